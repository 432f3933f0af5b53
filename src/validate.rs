use crate::{graph::TransitionGraph, word::Word};

/// Returns the first candidate, in the given order, that the graph allows.
pub fn first_valid<'a, I>(graph: &TransitionGraph, candidates: I) -> Option<&'a Word>
where
    I: IntoIterator<Item = &'a Word>,
{
    candidates.into_iter().find(|word| graph.allows(word))
}

/// Sums the positions, counted from one, of all candidates that the graph allows.
pub fn valid_position_sum<'a, I>(graph: &TransitionGraph, candidates: I) -> usize
where
    I: IntoIterator<Item = &'a Word>,
{
    candidates
        .into_iter()
        .enumerate()
        .filter(|(_, word)| graph.allows(word))
        .map(|(i, _)| i + 1)
        .sum()
}
