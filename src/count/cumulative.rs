use itertools::Itertools;
use num_traits::Zero;
use tracing::trace;

use crate::{
    alphabet::SymbolIndex,
    graph::TransitionGraph,
    math::{Count, Map, Matrix, Vector},
};

use super::{LengthWindow, WalkCounter};

/// Counts walks by precomputing, for every starting length `l0`, the row vector
/// `R = (1, ..., 1) · T` of the cumulative transformation `T = Σ M^k`, where `M` is the
/// transition matrix and `k` ranges over [`LengthWindow::extensions_from`]`(l0)`. The count
/// for a starting symbol `s` is then just the entry `R[s]`.
///
/// The powers of `M` are computed once and shared between all starting lengths, the rows are
/// differences of prefix sums over the column sums of these powers. The prefix sums are kept,
/// so a starting length without a precomputed row is answered from them entry by entry.
#[derive(Debug, Clone)]
pub struct CumulativeCounter {
    window: LengthWindow,
    prefix: Vec<Vector>,
    rows: Map<usize, Vector>,
}

impl CumulativeCounter {
    /// Precomputes the rows for every starting length in `1..=high`.
    pub fn new(graph: &TransitionGraph, window: LengthWindow) -> Self {
        Self::for_lengths(graph, window, 1..=window.high())
    }

    /// Precomputes the rows only for the given starting lengths. All other starting lengths
    /// are still counted correctly, just without a cached row.
    pub fn for_lengths<I>(graph: &TransitionGraph, window: LengthWindow, lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        // starting length zero needs the most powers
        let prefix = match window.extensions_from(0) {
            extensions if extensions.is_empty() => Vec::new(),
            extensions => prefix_column_sums(graph.matrix(), *extensions.end()),
        };

        let rows = lengths
            .into_iter()
            .filter(|&l| !window.extensions_from(l).is_empty())
            .unique()
            .map(|l| {
                let extensions = window.extensions_from(l);
                (l, &prefix[extensions.end() + 1] - &prefix[*extensions.start()])
            })
            .collect();

        Self {
            window,
            prefix,
            rows,
        }
    }

    /// Returns the precomputed row for `start_length`, if there is one.
    pub fn row(&self, start_length: usize) -> Option<&Vector> {
        self.rows.get(&start_length)
    }

    /// Computes the cumulative transformation `T` for `start_length` directly, by running
    /// through the powers of `matrix` and adding up those which reach a length in the window.
    pub fn transformation(matrix: &Matrix, window: LengthWindow, start_length: usize) -> Matrix {
        let mut transformation = Matrix::zero(matrix.dim());
        let mut current = Matrix::identity(matrix.dim());
        for length in start_length..=window.high() {
            if length >= window.low() {
                transformation += &current;
            }
            current = &current * matrix;
        }
        transformation
    }
}

/// Returns `prefix` with `prefix[k] = Σ_{i < k} (1, ..., 1) · matrix^i` for `k` in `0..=powers + 1`.
fn prefix_column_sums(matrix: &Matrix, powers: usize) -> Vec<Vector> {
    let mut prefix = Vec::with_capacity(powers + 2);
    prefix.push(Vector::zero(matrix.dim()));

    let mut current = Matrix::identity(matrix.dim());
    for k in 0..=powers {
        let mut next = prefix[k].clone();
        next += &current.column_sums();
        prefix.push(next);
        if k < powers {
            current = &current * matrix;
            trace!("computed power {} of the transition matrix", k + 1);
        }
    }
    prefix
}

impl WalkCounter for CumulativeCounter {
    fn window(&self) -> LengthWindow {
        self.window
    }

    fn count(&self, start: SymbolIndex, start_length: usize) -> Count {
        if self.window.extensions_from(start_length).is_empty() {
            return Count::zero();
        }
        if let Some(row) = self.rows.get(&start_length) {
            return row[start].clone();
        }
        let extensions = self.window.extensions_from(start_length);
        trace!("no precomputed row for starting length {start_length}");
        &self.prefix[extensions.end() + 1][start] - &self.prefix[*extensions.start()][start]
    }
}
