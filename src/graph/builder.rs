use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
    math::Matrix,
};

use super::TransitionGraph;

/// Helper struct for the construction of a [`TransitionGraph`]. It collects rules, which define
/// all outgoing edges of one source symbol at once, and loose edges. Nothing is resolved against
/// the alphabet until [`GraphBuilder::build`] is called, which either produces the complete graph
/// or fails without exposing anything.
///
/// # Example
/// ```
/// use walkcount::prelude::*;
///
/// let graph = GraphBuilder::default()
///     .with_rule('a', ['b', 'c'])
///     .with_rule('b', ['a'])
///     .with_edges([('c', 'a')])
///     .build()
///     .unwrap();
/// assert_eq!(graph.edge_count(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    alphabet: Alphabet,
    rules: Vec<(char, Vec<char>)>,
    edges: Vec<(char, char)>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::for_alphabet(Alphabet::latin())
    }
}

impl GraphBuilder {
    /// Creates an empty builder whose symbols are resolved in `alphabet`.
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            rules: vec![],
            edges: vec![],
        }
    }

    /// Adds a rule that defines the outgoing edges of `source`. Listing a destination more than
    /// once adds parallel edges. At most one rule may be given per source, a second one makes
    /// [`GraphBuilder::build`] fail.
    pub fn with_rule<I>(mut self, source: char, destinations: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.rules.push((source, destinations.into_iter().collect()));
        self
    }

    /// Adds a list of edges `(source, destination)`. Unlike rules, edges may share a source.
    pub fn with_edges<I: IntoIterator<Item = (char, char)>>(mut self, edges: I) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Parses rules of the form `SOURCE > DEST,DEST,...`, one per line. Blank lines are skipped
    /// and whitespace around symbols is ignored.
    pub fn with_rule_text(mut self, text: &str) -> Result<Self> {
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (source, destinations) = parse_rule(number + 1, line)?;
            trace!("parsed rule for `{source}` with {} destinations", destinations.len());
            self.rules.push((source, destinations));
        }
        Ok(self)
    }

    /// Resolves all rules and edges and builds the [`TransitionGraph`].
    pub fn build(self) -> Result<TransitionGraph> {
        let size = self.alphabet.size();
        let mut matrix = Matrix::zero(size);
        let mut adjacency = vec![BitSet::with_capacity(size); size];
        let mut sources = BitSet::with_capacity(size);
        let mut edge_count = 0;

        for (source, destinations) in &self.rules {
            let from = self.alphabet.index_of(*source)?;
            if !sources.insert(from) {
                return Err(Error::DuplicateRule(*source));
            }
            for destination in destinations {
                let to = self.alphabet.index_of(*destination)?;
                matrix.increment(to, from);
                adjacency[from].insert(to);
                edge_count += 1;
            }
        }

        for (source, destination) in &self.edges {
            let from = self.alphabet.index_of(*source)?;
            let to = self.alphabet.index_of(*destination)?;
            sources.insert(from);
            matrix.increment(to, from);
            adjacency[from].insert(to);
            edge_count += 1;
        }

        debug!(
            "built transition graph over {size} symbols with {} rules and {edge_count} edges",
            self.rules.len()
        );

        Ok(TransitionGraph {
            alphabet: self.alphabet,
            matrix,
            adjacency,
            sources,
            edge_count,
        })
    }
}

fn parse_rule(line: usize, content: &str) -> Result<(char, Vec<char>)> {
    let malformed = || Error::MalformedRule {
        line,
        content: content.to_string(),
    };

    let (source, destinations) = content.split_once('>').ok_or_else(malformed)?;
    let source = single_symbol(source).ok_or_else(malformed)?;
    let destinations = destinations
        .split(',')
        .map(|d| single_symbol(d).ok_or_else(malformed))
        .collect::<Result<Vec<_>>>()?;
    Ok((source, destinations))
}

fn single_symbol(text: &str) -> Option<char> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
