use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::{
    alphabet::SymbolIndex,
    graph::TransitionGraph,
    math::Set,
    word::Word,
};

/// A set of words, each of which is allowed by a [`TransitionGraph`], such that no word is a
/// prefix of another one. The words serve as generators: every word of interest extends exactly
/// one of them.
///
/// Two sets are equal if they contain the same words, the order in which they were accepted is
/// not taken into account.
#[derive(Debug, Clone, Default)]
pub struct PrefixFreeSet(Vec<Word>);

impl PrefixFreeSet {
    /// Reduces `candidates` to a prefix free set. Candidates are deduplicated and then treated
    /// in ascending order of length, ties are broken by the order in which they are given.
    /// A candidate that the graph does not allow is dropped right away, so it neither blocks
    /// nor is blocked by other candidates. Any other candidate is kept unless a previously kept
    /// word is a prefix of it.
    pub fn reduce<'a, I>(graph: &TransitionGraph, candidates: I) -> Self
    where
        I: IntoIterator<Item = &'a Word>,
    {
        let mut kept_symbols: Set<&'a [SymbolIndex]> = Set::default();
        let mut kept = Vec::new();
        let (mut invalid, mut redundant) = (0usize, 0usize);

        for word in candidates
            .into_iter()
            .unique()
            .sorted_by_key(|word| word.len())
        {
            if !graph.allows(word) {
                invalid += 1;
                continue;
            }
            let symbols = word.symbols();
            if (1..=symbols.len()).any(|end| kept_symbols.contains(&symbols[..end])) {
                redundant += 1;
                continue;
            }
            kept_symbols.insert(symbols);
            kept.push(word.clone());
        }

        debug!(
            "kept {} generators, dropped {invalid} invalid and {redundant} redundant candidates",
            kept.len()
        );
        Self(kept)
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no words.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the words in the order in which they were accepted, i.e. by ascending length.
    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.0.iter()
    }

    /// Returns true if `word` is an element.
    pub fn contains(&self, word: &Word) -> bool {
        self.0.contains(word)
    }

    /// Returns the element that is a prefix of `word`, if one exists. There is at most one.
    pub fn generator_of(&self, word: &Word) -> Option<&Word> {
        self.0.iter().find(|generator| generator.is_prefix_of(word))
    }

    /// Counts the words of every length.
    pub fn length_tally(&self) -> BTreeMap<usize, usize> {
        self.0.iter().map(Word::len).counts().into_iter().collect()
    }

    /// The distinct lengths of the words, in ascending order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(Word::len).dedup()
    }

    /// Verifies that no element is a prefix of a different element.
    pub fn is_prefix_free(&self) -> bool {
        self.0
            .iter()
            .tuple_combinations()
            .all(|(l, r)| !l.is_prefix_of(r) && !r.is_prefix_of(l))
    }
}

impl PartialEq for PrefixFreeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|word| other.contains(word))
    }
}
impl Eq for PrefixFreeSet {}

impl<'a> IntoIterator for &'a PrefixFreeSet {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for PrefixFreeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}
