use std::{ops::RangeInclusive, str::FromStr};

use tracing::debug;

use crate::{
    alphabet::SymbolIndex,
    graph::TransitionGraph,
    math::Count,
    reduce::PrefixFreeSet,
    word::Word,
};

mod cumulative;
pub use cumulative::CumulativeCounter;

mod propagation;
pub use propagation::PropagationCounter;

/// The inclusive range `low..=high` of word lengths that are counted. A window with
/// `low > high` is empty and every count over it is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LengthWindow {
    low: usize,
    high: usize,
}

impl LengthWindow {
    /// Creates the window `low..=high`.
    pub const fn new(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    /// The smallest counted length.
    pub fn low(&self) -> usize {
        self.low
    }

    /// The largest counted length.
    pub fn high(&self) -> usize {
        self.high
    }

    /// Returns true if no length is counted.
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// Returns true if `length` is counted.
    pub fn contains(&self, length: usize) -> bool {
        self.low <= length && length <= self.high
    }

    /// The counted lengths that a word of length `start_length` can be extended to.
    pub fn lengths_from(&self, start_length: usize) -> RangeInclusive<usize> {
        self.low.max(start_length)..=self.high
    }

    /// The numbers of edges that extend a word of length `start_length` into the window, this
    /// is empty if `start_length > high`.
    #[allow(clippy::reversed_empty_ranges)]
    pub fn extensions_from(&self, start_length: usize) -> RangeInclusive<usize> {
        if start_length > self.high {
            return 1..=0;
        }
        (self.low.max(start_length) - start_length)..=(self.high - start_length)
    }
}

impl Default for LengthWindow {
    fn default() -> Self {
        Self::new(7, 11)
    }
}

impl std::fmt::Display for LengthWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Counts the walks through a [`TransitionGraph`] that extend a word into a [`LengthWindow`].
pub trait WalkCounter: Sync {
    /// The window that is counted.
    fn window(&self) -> LengthWindow;

    /// Counts the walks that start in `start` and whose length, plus `start_length`, lies in
    /// the window. Equivalently, this is the number of words of a length in the window that
    /// extend a given word of length `start_length` ending in `start`.
    fn count(&self, start: SymbolIndex, start_length: usize) -> Count;

    /// Counts the extensions of `word`, see [`WalkCounter::count`].
    fn count_word(&self, word: &Word) -> Count {
        self.count(word.last(), word.len())
    }
}

/// Determines how walks are counted. Both strategies yield the same numbers, they differ
/// in how the work is distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Precompute one row vector per starting length from the powers of the transition
    /// matrix, each lookup is then constant time. See [`CumulativeCounter`].
    Cumulative,
    /// Propagate a vector through the transition matrix separately for every generator.
    /// See [`PropagationCounter`].
    Propagation,
    /// Pick one of the above depending on the size of the alphabet and the number of generators.
    #[default]
    Auto,
}

impl Strategy {
    /// Resolves [`Strategy::Auto`]. The matrix powers cost `high · n³` for an alphabet of size `n`
    /// and are shared by all generators, whereas propagation costs `high · n²` per generator.
    /// Hence the powers pay off as soon as there are at least `n` generators.
    pub fn resolve(self, alphabet_size: usize, generators: usize) -> Strategy {
        match self {
            Strategy::Auto if generators >= alphabet_size => Strategy::Cumulative,
            Strategy::Auto => Strategy::Propagation,
            concrete => concrete,
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cumulative" => Ok(Strategy::Cumulative),
            "propagation" => Ok(Strategy::Propagation),
            "auto" => Ok(Strategy::Auto),
            other => Err(format!("unknown strategy `{other}`")),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Cumulative => "cumulative",
            Strategy::Propagation => "propagation",
            Strategy::Auto => "auto",
        };
        write!(f, "{name}")
    }
}

/// A [`WalkCounter`] of either strategy.
#[derive(Debug, Clone)]
pub enum Counter<'g> {
    /// Counts with precomputed rows.
    Cumulative(CumulativeCounter),
    /// Counts by propagation.
    Propagation(PropagationCounter<'g>),
}

impl<'g> Counter<'g> {
    /// Creates a counter for the generators in `set`, resolving `strategy` if necessary. For
    /// [`Strategy::Cumulative`], only the rows for lengths that occur in `set` are computed.
    pub fn for_generators(
        graph: &'g TransitionGraph,
        window: LengthWindow,
        strategy: Strategy,
        set: &PrefixFreeSet,
    ) -> Self {
        let resolved = strategy.resolve(graph.size(), set.len());
        debug!("counting {} generators in window {window} with {resolved} strategy", set.len());
        match resolved {
            Strategy::Propagation => {
                Counter::Propagation(PropagationCounter::new(graph, window))
            }
            _ => Counter::Cumulative(CumulativeCounter::for_lengths(
                graph,
                window,
                set.lengths(),
            )),
        }
    }

    /// The strategy that this counter implements.
    pub fn strategy(&self) -> Strategy {
        match self {
            Counter::Cumulative(_) => Strategy::Cumulative,
            Counter::Propagation(_) => Strategy::Propagation,
        }
    }
}

impl WalkCounter for Counter<'_> {
    fn window(&self) -> LengthWindow {
        match self {
            Counter::Cumulative(c) => c.window(),
            Counter::Propagation(c) => c.window(),
        }
    }

    fn count(&self, start: SymbolIndex, start_length: usize) -> Count {
        match self {
            Counter::Cumulative(c) => c.count(start, start_length),
            Counter::Propagation(c) => c.count(start, start_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use crate::{math::Count, prelude::*};

    fn both(graph: &TransitionGraph, window: LengthWindow) -> [Counter<'_>; 2] {
        [
            Counter::Cumulative(CumulativeCounter::new(graph, window)),
            Counter::Propagation(PropagationCounter::new(graph, window)),
        ]
    }

    /// Enumerates all words explicitly, only feasible for tiny windows.
    fn brute_force(
        graph: &TransitionGraph,
        window: LengthWindow,
        start: usize,
        len: usize,
    ) -> u64 {
        let mut total = 0;
        let mut stack = vec![(start, len)];
        while let Some((symbol, length)) = stack.pop() {
            if window.contains(length) {
                total += 1;
            }
            if length >= window.high() {
                continue;
            }
            for next in graph.successors(symbol).iter() {
                let parallel: u64 = graph.multiplicity(symbol, next).try_into().unwrap();
                for _ in 0..parallel {
                    stack.push((next, length + 1));
                }
            }
        }
        total
    }

    #[test]
    fn windows() {
        let window = LengthWindow::new(7, 11);
        assert_eq!(window.lengths_from(3), 7..=11);
        assert_eq!(window.lengths_from(9), 9..=11);
        assert_eq!(window.extensions_from(3), 4..=8);
        assert_eq!(window.extensions_from(9), 0..=2);
        assert!(window.extensions_from(12).is_empty());
        assert!(LengthWindow::new(4, 3).is_empty());
        assert_eq!(LengthWindow::default(), window);
    }

    #[test]
    fn strategies() {
        assert_eq!(Strategy::Auto.resolve(52, 100), Strategy::Cumulative);
        assert_eq!(Strategy::Auto.resolve(52, 3), Strategy::Propagation);
        assert_eq!(Strategy::Propagation.resolve(52, 100), Strategy::Propagation);
        assert_eq!("auto".parse::<Strategy>(), Ok(Strategy::Auto));
        assert!("fastest".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Cumulative.to_string(), "cumulative");
    }

    #[test]
    fn alternating_pair() {
        let graph: TransitionGraph = "a > b\nb > a".parse().unwrap();
        for counter in both(&graph, LengthWindow::new(1, 3)) {
            assert_eq!(counter.count(0, 1).to_string(), "3");
        }
    }

    #[test]
    fn fork_and_join() {
        let graph: TransitionGraph = "a > b,c\nb > a\nc > a".parse().unwrap();
        for counter in both(&graph, LengthWindow::new(2, 2)) {
            assert_eq!(counter.count(0, 1).to_string(), "2");
        }
    }

    #[test]
    fn self_loop() {
        let graph = GraphBuilder::for_alphabet(Alphabet::of_size(1).unwrap())
            .with_rule('a', ['a'])
            .build()
            .unwrap();
        for counter in both(&graph, LengthWindow::new(0, 3)) {
            assert_eq!(counter.count(0, 1).to_string(), "3");
            assert_eq!(counter.count(0, 3).to_string(), "1");
        }
    }

    #[test]
    fn empty_windows_and_long_generators() {
        let graph: TransitionGraph = "a > a,b\nb > a,b".parse().unwrap();
        for counter in both(&graph, LengthWindow::new(5, 4)) {
            for start_length in 1..8 {
                assert!(counter.count(0, start_length).is_zero());
            }
        }
        for counter in both(&graph, LengthWindow::new(2, 4)) {
            assert!(counter.count(1, 5).is_zero());
            assert_eq!(counter.count(1, 4).to_string(), "1");
        }
    }

    #[test]
    fn agrees_with_enumeration() {
        let graph: TransitionGraph = "a > b,c,c\nb > a,d\nc > c,d\nd > a,b,c".parse().unwrap();
        for low in 0..=6 {
            for high in 0..=7 {
                let window = LengthWindow::new(low, high);
                let [cumulative, propagation] = both(&graph, window);
                for start in 0..5 {
                    for start_length in 1..=8 {
                        let expected = brute_force(&graph, window, start, start_length);
                        assert_eq!(
                            cumulative.count(start, start_length),
                            Count::from(expected),
                            "window {window} start {start} length {start_length}"
                        );
                        assert_eq!(
                            propagation.count(start, start_length),
                            Count::from(expected),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sums_of_fixed_lengths() {
        let graph: TransitionGraph = "a > b,c\nb > c\nc > a,b".parse().unwrap();
        let window = LengthWindow::new(3, 9);
        for counter in both(&graph, window) {
            for start in 0..3 {
                for start_length in 1..=10 {
                    let expected: Count = window
                        .extensions_from(start_length)
                        .map(|k| graph.walks_of_length(start, k))
                        .sum();
                    assert_eq!(counter.count(start, start_length), expected);
                }
            }
        }
    }

    #[test]
    fn exceeds_u64() {
        let graph: TransitionGraph = "a > b,c\nb > c,a\nc > a,b".parse().unwrap();
        let window = LengthWindow::new(7, 98);
        let [cumulative, propagation] = both(&graph, window);
        let total = cumulative.count(0, 1);
        assert_eq!(total, propagation.count(0, 1));
        assert!(total.bits() > 64);
        // every walk has exactly two continuations, so the lengths 7 to 98 contribute 2^6 + ... + 2^97
        let expected = (Count::from(1u32) << 98usize) - (Count::from(1u32) << 6usize);
        assert_eq!(total, expected);
    }
}
