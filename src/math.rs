/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Exact counts. Everything that is counted in this crate is a [`num_bigint::BigUint`], there
/// is no fixed width anywhere in the arithmetic.
pub type Count = num_bigint::BigUint;

mod matrix;
pub use matrix::Matrix;

mod vector;
pub use vector::Vector;
