use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, SymbolIndex},
    error::{Error, Result},
};

/// A non-empty finite word over an [`Alphabet`], stored both as the symbol indices and as the
/// text it was read from. Candidate strings and generators are words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    symbols: Vec<SymbolIndex>,
    text: String,
}

impl Word {
    /// Resolves every character of `text` in `alphabet`. Fails on the first character that
    /// does not belong to the alphabet, and on empty text.
    pub fn parse(alphabet: &Alphabet, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyWord);
        }
        let symbols = text
            .chars()
            .map(|c| alphabet.index_of(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            symbols,
            text: text.to_string(),
        })
    }

    /// Returns the number of symbols.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns the symbol indices of the word.
    pub fn symbols(&self) -> &[SymbolIndex] {
        &self.symbols
    }

    /// The first symbol.
    pub fn first(&self) -> SymbolIndex {
        self.symbols[0]
    }

    /// The last symbol, from which every extension of the word continues.
    pub fn last(&self) -> SymbolIndex {
        self.symbols[self.symbols.len() - 1]
    }

    /// Returns the text of the word.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if `self` is a (not necessarily proper) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Word) -> bool {
        other.symbols.starts_with(&self.symbols)
    }

    /// Iterates over all pairs of consecutive symbols.
    pub fn transitions(&self) -> impl Iterator<Item = (SymbolIndex, SymbolIndex)> + '_ {
        self.symbols.iter().copied().tuple_windows()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
