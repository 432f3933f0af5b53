use std::ops::{AddAssign, Index, Sub};

use itertools::Itertools;
use num_traits::{One, Zero};

use super::Count;

/// A dense vector of [`Count`]s. Depending on context it is either a column vector over
/// destination symbols (when propagated through a [`super::Matrix`]) or a row vector over
/// source symbols (when obtained through [`super::Matrix::column_sums`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector(Vec<Count>);

impl Vector {
    /// Creates the zero vector with `dim` entries.
    pub fn zero(dim: usize) -> Self {
        Self(vec![Count::zero(); dim])
    }

    /// Creates the indicator vector `e_position`, which is zero everywhere except for a one at `position`.
    pub fn indicator(dim: usize, position: usize) -> Self {
        assert!(position < dim, "indicator position {position} out of range {dim}");
        let mut out = Self::zero(dim);
        out.0[position] = Count::one();
        out
    }

    /// Creates the all-ones vector with `dim` entries.
    pub fn ones(dim: usize) -> Self {
        Self(vec![Count::one(); dim])
    }

    /// Returns the number of entries.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Sums all entries.
    pub fn sum(&self) -> Count {
        self.0.iter().sum()
    }

    /// Returns true if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }

    /// Iterates over the entries in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Count> {
        self.0.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Count] {
        &mut self.0
    }
}

impl Index<usize> for Vector {
    type Output = Count;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        assert_eq!(self.dim(), rhs.dim(), "vector dimensions differ");
        for (l, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *l += r;
        }
    }
}

/// Entrywise difference, panics if some entry of `rhs` is larger than the corresponding
/// entry of `self` since the result would not be a natural number.
impl Sub<&Vector> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        assert_eq!(self.dim(), rhs.dim(), "vector dimensions differ");
        Vector(self.0.iter().zip(rhs.0.iter()).map(|(l, r)| l - r).collect())
    }
}

impl FromIterator<Count> for Vector {
    fn from_iter<T: IntoIterator<Item = Count>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_and_sum() {
        let e = Vector::indicator(4, 2);
        assert_eq!(e.sum(), Count::one());
        assert_eq!(e[2], Count::one());
        assert!(e[0].is_zero());
        assert_eq!(Vector::ones(5).sum(), Count::from(5u32));
        assert!(Vector::zero(3).is_zero());
    }

    #[test]
    fn add_and_subtract() {
        let mut acc = Vector::ones(3);
        acc += &Vector::indicator(3, 1);
        assert_eq!(acc.to_string(), "[1, 2, 1]");
        let diff = &acc - &Vector::ones(3);
        assert_eq!(diff, Vector::indicator(3, 1));
    }
}
