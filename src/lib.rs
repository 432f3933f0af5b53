//! Library for counting the words of bounded length that a small directed graph over an
//! alphabet allows, where every word must extend one of a given list of candidate words.
//!
//! In essence, the graph is a set of rules `a > b,c` which state that `a` may be followed by
//! `b` or by `c`. A word is allowed if every pair of consecutive symbols is connected by an edge.
//! The candidates are first reduced to a [`reduce::PrefixFreeSet`] of generators: candidates
//! that the graph does not allow are dropped, and so are candidates that extend a shorter
//! generator, since all of their extensions are already counted for that generator. Then, for
//! every generator, the words whose length lies in a [`count::LengthWindow`] and that extend it
//! are counted and summed up.
//!
//! Counting never enumerates words. The graph is stored as a transition matrix `M` over
//! [`num_bigint::BigUint`], and the number of walks with `k` edges from a symbol `s` is the sum of
//! the entries of `M^k · e_s`. The most important trait is [`count::WalkCounter`], which has two
//! implementations:
//! - [`count::CumulativeCounter`] precomputes one row vector per starting length, after which
//!   every lookup is constant time. This pays off when there are many generators.
//! - [`count::PropagationCounter`] pushes a vector through the matrix for every generator,
//!   which avoids the cubic cost of matrix powers when there are only a few generators.
//!
//! Both produce the same numbers, the choice is made through [`count::Strategy`].
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use config::Config;

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use walkcount::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        accumulate::{accumulate, count_walks, Report},
        alphabet::{Alphabet, SymbolIndex},
        config::Config,
        count::{
            Counter, CumulativeCounter, LengthWindow, PropagationCounter, Strategy, WalkCounter,
        },
        error::{Error, Result},
        graph::{GraphBuilder, TransitionGraph},
        input::Puzzle,
        math,
        reduce::PrefixFreeSet,
        solve,
        validate::{first_valid, valid_position_sum},
        word::Word,
    };
}

/// Defines the crate wide error type.
pub mod error;
pub use error::{Error, Result};

/// This module contains the exact arithmetic: matrices and vectors over big integers, as well
/// as some type aliases which are used throughout the crate.
pub mod math;

/// Module that contains the mapping between symbols and their indices.
pub mod alphabet;

/// Module that contains definitions for dealing with finite words.
pub mod word;

/// This module defines transition graphs and how they are built from rules.
pub mod graph;

/// Parses problem instances consisting of candidates and rules.
pub mod input;

/// Reduces candidates to a prefix free set of generators.
pub mod reduce;

/// Counting of walks through a transition graph.
pub mod count;

/// Sums the counts of all generators and reports on them.
pub mod accumulate;

/// Configuration of a run.
pub mod config;

/// Queries that only check candidates against the graph, without counting anything.
pub mod validate;

/// Implements the generation of random transition graphs and candidates.
#[cfg(feature = "random")]
pub mod random;

/// Runs the whole pipeline on the problem instance `text`: parses the graph and candidates,
/// reduces the candidates to generators and counts their extensions.
///
/// ```
/// use walkcount::prelude::*;
///
/// let config = Config::default().with_low(1).with_high(3);
/// let report = solve("a,ab,aba\n\na > b\nb > a", &config).unwrap();
/// assert_eq!(report.total().to_string(), "3");
/// ```
pub fn solve(text: &str, config: &Config) -> Result<accumulate::Report> {
    let puzzle = input::Puzzle::parse(text)?;
    let set = reduce::PrefixFreeSet::reduce(&puzzle.graph, &puzzle.candidates);
    Ok(accumulate::count_walks(&puzzle.graph, &set, config))
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn alternating_scenario() {
        let puzzle: Puzzle = "a,ab,aba\n\na > b\nb > a".parse().unwrap();
        let set = PrefixFreeSet::reduce(&puzzle.graph, &puzzle.candidates);
        assert_eq!(set.iter().map(Word::as_str).collect::<Vec<_>>(), vec!["a"]);

        let config = Config::default().with_low(1).with_high(3);
        let report = count_walks(&puzzle.graph, &set, &config);
        assert_eq!(report.total().to_string(), "3");
        for (length, expected) in [(1, 1u32), (2, 1), (3, 1)] {
            assert_eq!(
                puzzle.graph.walks_of_length(0, length - 1),
                math::Count::from(expected)
            );
        }
    }

    #[test]
    fn fork_scenario() {
        let config = Config::default().with_low(2).with_high(2);
        let report = solve("a\n\na > b,c\nb > a\nc > a", &config).unwrap();
        assert_eq!(report.total().to_string(), "2");
    }

    #[test]
    fn malformed_input_fails_completely() {
        let config = Config::default();
        assert!(matches!(
            solve("ab\n\na > b\nb ~ a", &config),
            Err(Error::MalformedRule { line: 2, .. })
        ));
        assert!(matches!(
            solve("ab\n\na > b\nb > ?", &config),
            Err(Error::UnknownSymbol('?'))
        ));
    }

    #[test]
    fn exponential_growth() {
        let rules = "a > b,c\nb > c,d\nc > d,a\nd > a,b";
        let mut text = String::from("a,bc,dab\n\n");
        text.push_str(rules);

        let long = solve(&text, &Config::long_names()).unwrap();
        assert!(long.bits() > 64);
        assert_eq!(long.tally().values().sum::<usize>(), 3);

        // with every symbol having two successors, a generator of length l0 has 2^(l - l0)
        // extensions of length l
        let expected: math::Count = [1usize, 2, 3]
            .into_iter()
            .flat_map(|l0| (7..=98).map(move |l| math::Count::from(1u32) << (l - l0)))
            .sum();
        assert_eq!(long.total(), &expected);
    }

    #[cfg(feature = "random")]
    #[test]
    fn strategies_agree_on_random_instances() {
        use crate::random::{random_candidates, random_graph_seeded};

        for seed in 0..6 {
            let graph = random_graph_seeded(12, 3, seed).unwrap();
            let candidates = random_candidates(&graph, 40, 6, seed + 100).unwrap();
            let set = PrefixFreeSet::reduce(&graph, &candidates);
            assert!(set.is_prefix_free());
            assert!(set.iter().all(|word| graph.allows(word)));

            for (low, high) in [(1, 4), (7, 11), (3, 20), (9, 8)] {
                let config = Config::default().with_low(low).with_high(high);
                let cumulative =
                    count_walks(&graph, &set, &config.with_strategy(Strategy::Cumulative));
                let propagation =
                    count_walks(&graph, &set, &config.with_strategy(Strategy::Propagation));
                assert_eq!(cumulative.total(), propagation.total());
                assert_eq!(cumulative.contributions(), propagation.contributions());
            }
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn every_counted_word_has_one_generator() {
        use crate::random::random_candidates;

        let graph = GraphBuilder::for_alphabet(Alphabet::of_size(4).unwrap())
            .with_rule_text("a > b,c\nb > c,d\nc > a,d\nd > a,b,d")
            .unwrap()
            .build()
            .unwrap();
        let candidates = random_candidates(&graph, 30, 4, 5).unwrap();
        let set = PrefixFreeSet::reduce(&graph, &candidates);
        let window = LengthWindow::new(3, 6);

        // enumerate all allowed words up to the upper bound and attribute them to generators
        let alphabet = graph.alphabet();
        let mut words: Vec<String> = alphabet.universe().map(String::from).collect();
        let mut attributed = 0u64;
        while let Some(text) = words.pop() {
            let word = Word::parse(alphabet, &text).unwrap();
            if window.contains(word.len()) && set.generator_of(&word).is_some() {
                attributed += 1;
            }
            if word.len() < window.high() {
                for next in graph.successors(word.last()).iter() {
                    let mut longer = text.clone();
                    longer.extend(alphabet.symbol(next));
                    words.push(longer);
                }
            }
        }

        let report = count_walks(&graph, &set, &Config::default().with_window(window));
        assert_eq!(report.total(), &math::Count::from(attributed));
    }
}
