use std::{collections::BTreeMap, time::Duration};

use num_traits::Zero;
use tracing::info;

use crate::{
    config::Config,
    count::{Counter, Strategy, WalkCounter},
    graph::TransitionGraph,
    math::Count,
    reduce::PrefixFreeSet,
    word::Word,
};

/// The outcome of counting the extensions of every generator in a [`PrefixFreeSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    total: Count,
    contributions: Vec<(Word, Count)>,
    tally: BTreeMap<usize, usize>,
    strategy: Strategy,
    elapsed: Duration,
}

impl Report {
    /// The number of words of a length in the window that extend some generator.
    pub fn total(&self) -> &Count {
        &self.total
    }

    /// The number of bits needed to represent [`Report::total`].
    pub fn bits(&self) -> u64 {
        self.total.bits()
    }

    /// The number of extensions of every single generator, in the order of the set.
    pub fn contributions(&self) -> &[(Word, Count)] {
        &self.contributions
    }

    /// The number of generators of every length.
    pub fn tally(&self) -> &BTreeMap<usize, usize> {
        &self.tally
    }

    /// The strategy that was used for counting, never [`Strategy::Auto`].
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The time spent counting, including any precomputation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Renders the tally as a table with one row per generator length.
    pub fn tally_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Length", "Generators"]);
        for (length, count) in &self.tally {
            builder.push_record([length.to_string(), count.to_string()]);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

/// Sums the counts of all generators in `set` and returns the total together with the count
/// of every single generator.
pub fn accumulate<C: WalkCounter>(counter: &C, set: &PrefixFreeSet) -> (Count, Vec<Count>) {
    #[cfg(feature = "parallel")]
    let counts: Vec<Count> = {
        use rayon::prelude::*;
        set.iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|word| counter.count_word(word))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let counts: Vec<Count> = set.iter().map(|word| counter.count_word(word)).collect();

    let total = counts.iter().fold(Count::zero(), |acc, count| acc + count);
    (total, counts)
}

/// Counts the extensions of every generator in `set` into the window of `config`, with the
/// strategy of `config`. Only the counting itself is timed.
pub fn count_walks(graph: &TransitionGraph, set: &PrefixFreeSet, config: &Config) -> Report {
    let start = std::time::Instant::now();
    let counter = Counter::for_generators(graph, config.window, config.strategy, set);
    let (total, counts) = accumulate(&counter, set);
    let elapsed = start.elapsed();

    info!(
        "counted {} bit total for {} generators in {}µs",
        total.bits(),
        set.len(),
        elapsed.as_micros()
    );

    Report {
        total,
        contributions: set.iter().cloned().zip(counts).collect(),
        tally: set.length_tally(),
        strategy: counter.strategy(),
        elapsed,
    }
}
