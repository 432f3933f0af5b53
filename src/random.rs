use itertools::Itertools;
use tracing::debug;

use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
    graph::{GraphBuilder, TransitionGraph},
    word::Word,
};

/// Generates a random graph over the first `symbols` symbols of the default alphabet, in which
/// every symbol has exactly `out_degree` outgoing edges. Destinations are drawn uniformly and
/// independently, so parallel edges and self loops may occur. Fails if the default alphabet has
/// fewer than `symbols` symbols.
pub fn random_graph(symbols: usize, out_degree: usize) -> Result<TransitionGraph> {
    random_graph_seeded(symbols, out_degree, fastrand::u64(..))
}

/// Works as [`random_graph`], but draws from a generator seeded with `seed`, which makes the
/// result reproducible.
pub fn random_graph_seeded(
    symbols: usize,
    out_degree: usize,
    seed: u64,
) -> Result<TransitionGraph> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let alphabet = Alphabet::of_size(symbols)?;
    let universe = alphabet.universe().collect_vec();

    let mut builder = GraphBuilder::for_alphabet(alphabet);
    for &source in &universe {
        let destinations = (0..out_degree)
            .map(|_| universe[rng.usize(..universe.len())])
            .collect_vec();
        builder = builder.with_rule(source, destinations);
    }
    debug!("generated random graph with {symbols} symbols and out degree {out_degree}");

    builder.build()
}

/// Draws `count` candidate words of length `1..=max_length` for `graph`. Most of them are walks
/// through the graph, but with probability `1/4` each step jumps to an arbitrary symbol, so some
/// candidates are not allowed by the graph. Fails with [`Error::EmptyWord`] if words are
/// requested but `max_length` is zero or the alphabet is empty.
pub fn random_candidates(
    graph: &TransitionGraph,
    count: usize,
    max_length: usize,
    seed: u64,
) -> Result<Vec<Word>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let alphabet = graph.alphabet();
    let size = alphabet.size();
    if count > 0 && (max_length == 0 || size == 0) {
        return Err(Error::EmptyWord);
    }

    (0..count)
        .map(|_| {
            let length = rng.usize(1..=max_length);
            let mut current = rng.usize(..size);
            let mut text = String::with_capacity(length);
            for _ in 0..length {
                text.extend(alphabet.symbol(current));
                let successors = graph.successors(current).iter().collect_vec();
                current = if successors.is_empty() || rng.usize(..4) == 0 {
                    rng.usize(..size)
                } else {
                    successors[rng.usize(..successors.len())]
                };
            }
            Word::parse(alphabet, &text)
        })
        .collect()
}
