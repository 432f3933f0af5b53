use num_traits::Zero;

use crate::{
    alphabet::SymbolIndex,
    graph::TransitionGraph,
    math::{Count, Vector},
};

use super::{LengthWindow, WalkCounter};

/// Counts walks by pushing the indicator vector of the starting symbol through the transition
/// matrix, one edge at a time, and adding up the entries whenever the current length lies in
/// the window. Nothing is precomputed, every call costs `high - start_length` matrix-vector
/// products.
#[derive(Debug, Clone, Copy)]
pub struct PropagationCounter<'g> {
    graph: &'g TransitionGraph,
    window: LengthWindow,
}

impl<'g> PropagationCounter<'g> {
    /// Creates a counter for walks through `graph`.
    pub fn new(graph: &'g TransitionGraph, window: LengthWindow) -> Self {
        Self { graph, window }
    }
}

impl WalkCounter for PropagationCounter<'_> {
    fn window(&self) -> LengthWindow {
        self.window
    }

    fn count(&self, start: SymbolIndex, start_length: usize) -> Count {
        let mut total = Count::zero();
        if self.window.extensions_from(start_length).is_empty() {
            return total;
        }

        let matrix = self.graph.matrix();
        let mut current = Vector::indicator(matrix.dim(), start);
        for length in start_length..=self.window.high() {
            if length >= self.window.low() {
                total += current.sum();
            }
            if length == self.window.high() || current.is_zero() {
                break;
            }
            current = matrix * &current;
        }
        total
    }
}
