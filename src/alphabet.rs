use crate::{
    error::{Error, Result},
    math::Bijection,
};

/// Dense index of a symbol in an [`Alphabet`], ranging from `0` to `alphabet.size() - 1`.
pub type SymbolIndex = usize;

/// The symbols of the default alphabet, lowercase letters come first.
const LATIN: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An explicitly enumerated alphabet of `char` symbols, each of which is associated with
/// precisely one [`SymbolIndex`]. The indices are dense, i.e. they are exactly `0..size`.
///
/// # Example
/// ```
/// use walkcount::prelude::*;
///
/// let alphabet = Alphabet::latin();
/// assert_eq!(alphabet.size(), 52);
/// assert_eq!(alphabet.index_of('b').unwrap(), 1);
/// assert_eq!(alphabet.index_of('B').unwrap(), 27);
/// assert!(alphabet.index_of('7').is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet(Bijection<char, SymbolIndex>);

impl Alphabet {
    /// Creates the alphabet `a..z` followed by `A..Z`, so `a` has index 0 and `A` has index 26.
    pub fn latin() -> Self {
        Self(LATIN.chars().enumerate().map(|(i, c)| (c, i)).collect())
    }

    /// Creates an alphabet consisting of the first `size` symbols of [`Alphabet::latin`]. Fails
    /// with [`Error::AlphabetTooLarge`] if there are fewer than `size` of them.
    pub fn of_size(size: usize) -> Result<Self> {
        let available = LATIN.chars().count();
        if size > available {
            return Err(Error::AlphabetTooLarge(size, available));
        }
        Ok(Self(
            LATIN.chars().take(size).enumerate().map(|(i, c)| (c, i)).collect(),
        ))
    }

    /// Creates an alphabet from the given symbols, which are indexed in the order in which
    /// they are given. Fails if some symbol appears twice, as then the mapping would not be
    /// a bijection.
    pub fn from_symbols<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let mut map = Bijection::new();
        for (i, c) in symbols.into_iter().enumerate() {
            if map.insert_no_overwrite(c, i).is_err() {
                return Err(Error::DuplicateSymbol(c));
            }
        }
        Ok(Self(map))
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains_left(&symbol)
    }

    /// Resolves `symbol` to its index, if it belongs to the alphabet.
    pub fn try_index_of(&self, symbol: char) -> Option<SymbolIndex> {
        self.0.get_by_left(&symbol).copied()
    }

    /// Resolves `symbol` to its index, failing with [`Error::UnknownSymbol`] otherwise.
    pub fn index_of(&self, symbol: char) -> Result<SymbolIndex> {
        self.try_index_of(symbol).ok_or(Error::UnknownSymbol(symbol))
    }

    /// Returns the symbol with the given index.
    pub fn symbol(&self, index: SymbolIndex) -> Option<char> {
        self.0.get_by_right(&index).copied()
    }

    /// Iterates over all symbols in index order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.size()).filter_map(|i| self.symbol(i))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}
