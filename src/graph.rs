use std::str::FromStr;

use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, SymbolIndex},
    error::Error,
    math::{Count, Matrix, Vector},
    word::Word,
};

mod builder;
pub use builder::GraphBuilder;

/// A directed graph over the symbols of an [`Alphabet`], where parallel edges are allowed. It is
/// stored twice: as a destination-major [`Matrix`] of edge multiplicities, which is what walks
/// are counted with, and as one [`BitSet`] of successors per symbol, which is what words are
/// validated against. Both are derived from the same edges by [`GraphBuilder`] and the graph
/// is immutable afterwards.
///
/// A symbol that is never the source of a rule or edge has no successors. Looking it up is not
/// an error, it simply yields the empty set.
#[derive(Clone, Debug)]
pub struct TransitionGraph {
    pub(crate) alphabet: Alphabet,
    pub(crate) matrix: Matrix,
    pub(crate) adjacency: Vec<BitSet>,
    pub(crate) sources: BitSet,
    pub(crate) edge_count: usize,
}

impl TransitionGraph {
    /// Returns a [`GraphBuilder`] over the default alphabet.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Parses rule text over the default alphabet, see [`GraphBuilder::with_rule_text`].
    pub fn from_rules(text: &str) -> Result<Self, Error> {
        GraphBuilder::default().with_rule_text(text)?.build()
    }

    /// Returns the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the transition matrix, whose entry at (`to`, `from`) is the number of edges
    /// from `from` to `to`.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Returns the number of symbols, which is the dimension of the matrix.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the total number of edges, counting parallel edges individually.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the number of edges from `from` to `to`.
    pub fn multiplicity(&self, from: SymbolIndex, to: SymbolIndex) -> &Count {
        &self.matrix[(to, from)]
    }

    /// Returns true if `symbol` is the source of some rule or edge.
    pub fn has_rule(&self, symbol: SymbolIndex) -> bool {
        self.sources.contains(symbol)
    }

    /// Returns the set of symbols reachable from `symbol` with a single edge.
    pub fn successors(&self, symbol: SymbolIndex) -> &BitSet {
        &self.adjacency[symbol]
    }

    /// Returns true if there is an edge from `from` to `to`.
    pub fn can_follow(&self, from: SymbolIndex, to: SymbolIndex) -> bool {
        self.adjacency
            .get(from)
            .map(|successors| successors.contains(to))
            .unwrap_or(false)
    }

    /// Returns true if every pair of consecutive symbols in `word` is connected by an edge. Words
    /// of length one are trivially allowed.
    pub fn allows(&self, word: &Word) -> bool {
        word.transitions().all(|(from, to)| self.can_follow(from, to))
    }

    /// Counts the walks with exactly `length` edges starting in `start`, summed over all end
    /// points. There is exactly one walk of length zero.
    pub fn walks_of_length(&self, start: SymbolIndex, length: usize) -> Count {
        (0..length)
            .fold(Vector::indicator(self.size(), start), |current, _| {
                &self.matrix * &current
            })
            .sum()
    }

    /// Renders a table with one row per source symbol and one column per symbol that occurs in
    /// some edge. Cells contain the edge multiplicity, or `-` if there is no edge.
    pub fn transition_table(&self) -> String {
        let used = (0..self.size())
            .filter(|&i| {
                self.has_rule(i) || self.adjacency.iter().any(|successors| successors.contains(i))
            })
            .collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("Source".to_string())
                .chain(used.iter().map(|&i| self.display_symbol(i))),
        );
        for from in self.sources.iter() {
            let mut row = vec![self.display_symbol(from)];
            for &to in &used {
                let multiplicity = self.multiplicity(from, to);
                if num_traits::Zero::is_zero(multiplicity) {
                    row.push("-".to_string());
                } else {
                    row.push(multiplicity.to_string());
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    fn display_symbol(&self, index: SymbolIndex) -> String {
        self.alphabet
            .symbol(index)
            .map(String::from)
            .unwrap_or_else(|| format!("#{index}"))
    }
}

impl FromStr for TransitionGraph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rules(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(graph: &TransitionGraph, text: &str) -> Word {
        Word::parse(graph.alphabet(), text).unwrap()
    }

    #[test]
    fn matrix_and_adjacency_agree() {
        let graph: TransitionGraph = "a > b,c\nb > a\nc > a,c,c".parse().unwrap();
        for from in 0..graph.size() {
            for to in 0..graph.size() {
                assert_eq!(
                    graph.can_follow(from, to),
                    !num_traits::Zero::is_zero(graph.multiplicity(from, to)),
                );
            }
        }
        assert_eq!(graph.multiplicity(2, 2).to_string(), "2");
        assert_eq!(graph.successors(2).len(), 2);
        assert!(graph.successors(25).is_empty());
    }

    #[test]
    fn validity() {
        let graph: TransitionGraph = "a > b\nb > a".parse().unwrap();
        assert!(graph.allows(&word(&graph, "abab")));
        assert!(!graph.allows(&word(&graph, "abb")));
        // `z` is not a rule source, so nothing may follow it
        assert!(graph.allows(&word(&graph, "z")));
        assert!(!graph.allows(&word(&graph, "za")));
        assert!(!graph.allows(&word(&graph, "az")));
    }

    #[test]
    fn walks_of_fixed_length() {
        let graph: TransitionGraph = "a > b,c\nb > a\nc > a".parse().unwrap();
        assert_eq!(graph.walks_of_length(0, 0).to_string(), "1");
        assert_eq!(graph.walks_of_length(0, 1).to_string(), "2");
        assert_eq!(graph.walks_of_length(0, 2).to_string(), "2");
        assert_eq!(graph.walks_of_length(0, 3).to_string(), "4");
        // the one step recurrence W(s, k) = sum over successors t of W(t, k - 1)
        for k in 1..8 {
            let recurrence: Count = graph
                .successors(0)
                .iter()
                .map(|t| graph.multiplicity(0, t) * graph.walks_of_length(t, k - 1))
                .sum();
            assert_eq!(graph.walks_of_length(0, k), recurrence);
        }
        // a symbol without rules only has the empty walk
        assert_eq!(graph.walks_of_length(5, 0).to_string(), "1");
        assert_eq!(graph.walks_of_length(5, 4).to_string(), "0");
    }

    #[test]
    fn renders_table() {
        let graph: TransitionGraph = "a > b,b\nb > a".parse().unwrap();
        let table = graph.transition_table();
        assert!(table.contains("Source"));
        assert!(table.contains('2'));
        assert!(table.lines().any(|line| line.contains('b') && line.contains('-')));
    }
}
