/*!
 * Sparse pivoted factorizations over exact fields.
 *
 * This crate is the matrix kernel of an algebraic-topology toolkit: it
 * decomposes a sparse [`ColumnMatrix`] over an exact [`Field`] into four
 * related pivoted forms, and transports triangular changes of basis
 * across the pivot-reduced cores so that independently triangularized
 * bases can be composed.
 *
 * # Factorizations
 *
 * [`factorize`] (or the per-variant entry points [`leup`], [`pleu`],
 * [`uelp`], [`puel`]) produces a [`Factorization`] holding four owned
 * factors: a unit lower triangular `l`, a pivot-reduced core `e`, a unit
 * upper triangular `u` and a permutation `p`, with
 *
 * * `A = L * E * U * P` for [`Variant::Leup`], `E` left-anchored,
 * * `A = P * L * E * U` for [`Variant::Pleu`], `E` right-anchored,
 * * `A = U * E * L * P` for [`Variant::Uelp`], `E` anchored from the
 *   bottom row end,
 * * `A = P * U * E * L` for [`Variant::Puel`], the remaining mirror.
 *
 * Only the LEUP elimination exists as an algorithm.  The other three
 * variants conjugate it by transpose and/or index reversal, so the four
 * cannot drift out of consistency with each other.  The elimination is
 * exact, sequential, and output-sensitive: fill-in is deferred to the
 * right factor and only materialized once a column's final elimination
 * path is known.
 *
 * # Commutation
 *
 * [`el_l_commute`] and its three mirrored directions solve the
 * commutation identity `Ltilde * EL = EL * L` for a pivot-reduced `EL`
 * and triangular `L`: the change of basis `L` is re-expressed in the
 * pivot coordinates of `EL`.  Entries of `L` referencing unpivoted
 * positions of `EL` are dropped; the identity is guaranteed on the
 * pivoted subspace.
 *
 * # Coefficients
 *
 * All arithmetic is exact.  [`ModP`] provides the prime fields and
 * [`Rational`] exact rationals; anything implementing [`Field`] works.
 * Degenerate inputs (zero rows, zero columns, the zero matrix) are
 * valid and factor into identity-sized triangular and permutation
 * factors around an all-zero core.
 *
 * # Example
 *
 * ```
 * use sparse_fact::{factorize, ColumnMatrix, ModP, Variant};
 *
 * type F5 = ModP<5>;
 *
 * let a: ColumnMatrix<F5> = ColumnMatrix::identity(4);
 * let f = factorize(&a, Variant::Leup).unwrap();
 * assert_eq!(f.leup_prod(), a);
 * assert!(f.e.is_el());
 * ```
 */

pub mod colmatrix;
pub mod commute;
pub mod factor;
pub mod field;
pub mod pivots;
pub mod solve;

pub use colmatrix::{ColumnMatrix, SparseVector};
pub use commute::{el_l_commute, eu_u_commute, l_el_commute, u_eu_commute};
pub use factor::{factorize, leup, pleu, puel, uelp, Factorization, Variant};
pub use field::{Field, LinalgError, ModP, Rational};
pub use solve::{l_solve, u_solve};
