use std::ops::{AddAssign, Index, Mul};

use num_traits::{One, Zero};

use super::{Count, Vector};

/// A square matrix of [`Count`]s stored in row-major order.
///
/// The transition matrix of a [`crate::graph::TransitionGraph`] is destination-major, the entry
/// in row `j` and column `i` counts the edges from `i` to `j`. Multiplying such a matrix with a
/// column vector over the current symbols therefore yields a vector over the successor symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix {
    dim: usize,
    entries: Vec<Count>,
}

impl Matrix {
    /// Creates the `dim`×`dim` zero matrix.
    pub fn zero(dim: usize) -> Self {
        Self {
            dim,
            entries: vec![Count::zero(); dim * dim],
        }
    }

    /// Creates the `dim`×`dim` identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut out = Self::zero(dim);
        for i in 0..dim {
            out.entries[i * dim + i] = Count::one();
        }
        out
    }

    /// Returns the number of rows, which equals the number of columns.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Adds one to the entry at (`row`, `col`).
    pub fn increment(&mut self, row: usize, col: usize) {
        self.entries[row * self.dim + col] += 1u32;
    }

    /// Returns true if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(Zero::is_zero)
    }

    /// Iterates over the entries of row `row`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Count> + '_ {
        self.entries[row * self.dim..(row + 1) * self.dim].iter()
    }

    /// Iterates over the entries of column `col`.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Count> + '_ {
        self.entries.iter().skip(col).step_by(self.dim.max(1))
    }

    /// Computes the row vector `(1, ..., 1) · self`, i.e. the sum of every column.
    pub fn column_sums(&self) -> Vector {
        (0..self.dim).map(|col| self.column(col).sum()).collect()
    }

    /// Computes the matrix power `self^exponent` by repeated multiplication.
    pub fn pow(&self, exponent: usize) -> Matrix {
        (0..exponent).fold(Matrix::identity(self.dim), |acc, _| &acc * self)
    }

    /// Writes row `i` of `self · rhs` into `out`. Zero entries are skipped, transition
    /// matrices are usually sparse.
    fn product_row(&self, rhs: &Matrix, i: usize, out: &mut [Count]) {
        for (k, left) in self.row(i).enumerate() {
            if left.is_zero() {
                continue;
            }
            for (target, right) in out.iter_mut().zip(rhs.row(k)) {
                if !right.is_zero() {
                    *target += left * right;
                }
            }
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Count;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.entries[row * self.dim + col]
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        assert_eq!(self.dim, rhs.dim, "matrix dimensions differ");
        for (l, r) in self.entries.iter_mut().zip(rhs.entries.iter()) {
            *l += r;
        }
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    #[cfg(not(feature = "parallel"))]
    fn mul(self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.dim, rhs.dim, "matrix dimensions differ");
        let mut out = Matrix::zero(self.dim);
        if self.dim == 0 {
            return out;
        }
        for (i, row) in out.entries.chunks_mut(self.dim).enumerate() {
            self.product_row(rhs, i, row);
        }
        out
    }

    #[cfg(feature = "parallel")]
    fn mul(self, rhs: &Matrix) -> Matrix {
        use rayon::prelude::*;

        assert_eq!(self.dim, rhs.dim, "matrix dimensions differ");
        let mut out = Matrix::zero(self.dim);
        if self.dim == 0 {
            return out;
        }
        out.entries
            .par_chunks_mut(self.dim)
            .enumerate()
            .for_each(|(i, row)| self.product_row(rhs, i, row));
        out
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        assert_eq!(self.dim, rhs.dim(), "matrix and vector dimensions differ");
        let mut out = Vector::zero(self.dim);
        for (col, value) in rhs.iter().enumerate() {
            if value.is_zero() {
                continue;
            }
            for (target, entry) in out.entries_mut().iter_mut().zip(self.column(col)) {
                if !entry.is_zero() {
                    *target += entry * value;
                }
            }
        }
        out
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.dim {
            let cells: Vec<String> = self.row(row).map(ToString::to_string).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&[u32]]) -> Matrix {
        let mut m = Matrix::zero(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                for _ in 0..v {
                    m.increment(i, j);
                }
            }
        }
        m
    }

    #[test]
    fn multiplication() {
        let a = from_rows(&[&[1, 2], &[0, 1]]);
        let b = from_rows(&[&[0, 1], &[1, 0]]);
        assert_eq!(&a * &b, from_rows(&[&[2, 1], &[1, 0]]));
        assert_eq!(&a * &Matrix::identity(2), a);
        assert_eq!(a.pow(3), from_rows(&[&[1, 6], &[0, 1]]));
        assert_eq!(a.pow(0), Matrix::identity(2));
    }

    #[test]
    fn vector_application_and_column_sums() {
        // edges 0 -> 1 twice and 1 -> 0 once, destination-major
        let m = from_rows(&[&[0, 1], &[2, 0]]);
        let v = &m * &Vector::indicator(2, 0);
        assert_eq!(v, Vector::from_iter([Count::zero(), Count::from(2u32)]));
        assert_eq!(m.column_sums(), Vector::from_iter([2u32, 1].map(Count::from)));
        let mut acc = Matrix::identity(2);
        acc += &m;
        assert_eq!(acc, from_rows(&[&[1, 1], &[2, 1]]));
    }

    #[test]
    fn entries_grow_beyond_u64() {
        let doubling = from_rows(&[&[2]]);
        let big = doubling.pow(100);
        assert_eq!(big[(0, 0)], Count::one() << 100usize);
        assert!(big[(0, 0)].bits() > 64);
    }
}
