/*
 * @file matrix.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Column-major sparse matrices over an exact field.  A matrix is an
 * ordered sequence of sparse columns plus explicit dimensions; shape
 * properties (triangular, pivot, echelon) are predicates computed by
 * traversal, not separate types.
 */

use crate::colmatrix::vector::SparseVector;
use crate::field::Field;
use rand::Rng;
use std::ops::Mul;

/** Sparse matrix stored as a sequence of sparse columns. */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMatrix<F> {
    nrow: usize,
    ncol: usize,
    cols: Vec<SparseVector<F>>,
}

impl<F: Field> ColumnMatrix<F> {
    /** Create a zero matrix. */
    pub fn new(nrow: usize, ncol: usize) -> Self {
        ColumnMatrix { nrow, ncol, cols: vec![SparseVector::new(); ncol] }
    }

    /** Create a matrix from explicit columns. */
    pub fn from_cols(nrow: usize, ncol: usize, cols: Vec<SparseVector<F>>) -> Self {
        assert_eq!(ncol, cols.len());
        debug_assert!(cols.iter().all(|c| c.last().map_or(true, |(r, _)| r < nrow)));
        ColumnMatrix { nrow, ncol, cols }
    }

    /** The identity matrix. */
    pub fn identity(n: usize) -> Self {
        let cols = (0..n).map(|j| SparseVector::single(j, F::one())).collect();
        ColumnMatrix { nrow: n, ncol: n, cols }
    }

    /**
     * Random matrix for test generation: each entry is nonzero with
     * probability `density`, drawn as the image of a nonzero integer in
     * `-mag..=mag`.
     */
    pub fn random<R: Rng>(nrow: usize, ncol: usize, density: f64, mag: i64, rng: &mut R) -> Self {
        assert!(mag > 0);
        let mut cols = Vec::with_capacity(ncol);
        for _ in 0..ncol {
            let mut col = SparseVector::new();
            for i in 0..nrow {
                if rng.gen_bool(density) {
                    let v = loop {
                        let k = rng.gen_range(-mag..=mag);
                        if k != 0 {
                            let v = F::from_int(k);
                            if !v.is_zero() {
                                break v;
                            }
                        }
                    };
                    col.push(i, v);
                }
            }
            cols.push(col);
        }
        ColumnMatrix { nrow, ncol, cols }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /** Total number of stored entries. */
    pub fn nnz(&self) -> usize {
        self.cols.iter().map(|c| c.nnz()).sum()
    }

    pub fn col(&self, j: usize) -> &SparseVector<F> {
        &self.cols[j]
    }

    pub fn col_mut(&mut self, j: usize) -> &mut SparseVector<F> {
        &mut self.cols[j]
    }

    pub fn set_col(&mut self, j: usize, col: SparseVector<F>) {
        debug_assert!(col.last().map_or(true, |(r, _)| r < self.nrow));
        self.cols[j] = col;
    }

    /** Return mutable aliases to two different columns of self.
     * Must be different to satisfy the borrow checker.
     */
    pub fn two_cols(&mut self, a: usize, b: usize) -> (&mut SparseVector<F>, &mut SparseVector<F>) {
        if a < b {
            let (lo, hi) = self.cols.split_at_mut(b);
            (&mut lo[a], &mut hi[0])
        } else if b < a {
            let (lo, hi) = self.cols.split_at_mut(a);
            (&mut hi[0], &mut lo[b])
        } else {
            panic!("two_cols must be disjoint!");
        }
    }

    /** The entry at (row, col), zero if absent. */
    pub fn get(&self, row: usize, col: usize) -> F {
        self.cols[col].get(row)
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) {
        self.cols.swap(a, b);
    }

    /** Scale row `r` by `coeff[r]`, for every row. */
    pub fn row_scale(&mut self, coeff: &[F]) {
        assert_eq!(coeff.len(), self.nrow);
        for col in self.cols.iter_mut() {
            col.row_scale(coeff);
        }
    }

    /** The transpose. */
    pub fn transpose(&self) -> ColumnMatrix<F> {
        let mut cols = vec![SparseVector::new(); self.nrow];
        for j in 0..self.ncol {
            for (i, v) in self.cols[j].iter() {
                cols[i].push(j, v);
            }
        }
        ColumnMatrix { nrow: self.ncol, ncol: self.nrow, cols }
    }

    /** Reverse the row order and the column order in place.  Conjugating
     * twice is the identity; it turns top-anchored pivot structure into
     * bottom-anchored and swaps lower with upper triangular. */
    pub fn conjugate(&mut self) {
        self.cols.reverse();
        let nrow = self.nrow;
        for col in self.cols.iter_mut() {
            *col = col.reversed(nrow);
        }
    }

    /** The conjugated (index-reversed) matrix. */
    pub fn conjugated(&self) -> ColumnMatrix<F> {
        let mut out = self.clone();
        out.conjugate();
        out
    }

    /* ---- shape predicates ---- */

    /** Every entry lies at row <= column index. */
    pub fn is_upper(&self) -> bool {
        self.cols
            .iter()
            .enumerate()
            .all(|(j, c)| c.last().map_or(true, |(r, _)| r <= j))
    }

    /** Every entry lies at row >= column index. */
    pub fn is_lower(&self) -> bool {
        self.cols
            .iter()
            .enumerate()
            .all(|(j, c)| c.first().map_or(true, |(r, _)| r >= j))
    }

    /** Exactly one unit entry per column and per row: a permutation. */
    pub fn is_pivot_matrix(&self) -> bool {
        if self.nrow != self.ncol {
            return false;
        }
        let mut seen = vec![false; self.nrow];
        for c in self.cols.iter() {
            if c.nnz() != 1 {
                return false;
            }
            let (r, v) = c.first().unwrap();
            if v != F::one() || seen[r] {
                return false;
            }
            seen[r] = true;
        }
        true
    }

    /**
     * Left-anchored echelon: the nonzero columns come first, their pivot
     * rows (topmost entries) strictly increase left to right, and every
     * column after the first zero column is zero.
     */
    pub fn is_el(&self) -> bool {
        let mut last_piv: Option<usize> = None;
        let mut seen_zero = false;
        for c in self.cols.iter() {
            match c.first() {
                None => seen_zero = true,
                Some((r, _)) => {
                    if seen_zero || last_piv.map_or(false, |p| r <= p) {
                        return false;
                    }
                    last_piv = Some(r);
                }
            }
        }
        true
    }

    /** Right-anchored echelon: the transpose is EL. */
    pub fn is_eu(&self) -> bool {
        self.transpose().is_el()
    }

    /** EL anchored from the bottom row end: the conjugated transpose is EL. */
    pub fn is_el_hat(&self) -> bool {
        self.conjugated().transpose().is_el()
    }

    /** EU anchored from the bottom row end: the conjugate is EL. */
    pub fn is_eu_hat(&self) -> bool {
        self.conjugated().is_el()
    }
}

/** Sparse column-matrix product. */
impl<F: Field> Mul<&ColumnMatrix<F>> for &ColumnMatrix<F> {
    type Output = ColumnMatrix<F>;

    fn mul(self, rhs: &ColumnMatrix<F>) -> ColumnMatrix<F> {
        assert_eq!(self.ncol, rhs.nrow);
        let mut cols = Vec::with_capacity(rhs.ncol);
        let mut acc = vec![F::zero(); self.nrow];
        for j in 0..rhs.ncol {
            for (k, c) in rhs.cols[j].iter() {
                for (i, v) in self.cols[k].iter() {
                    acc[i] = acc[i] + c * v;
                }
            }
            let mut col = SparseVector::new();
            for (i, a) in acc.iter_mut().enumerate() {
                if !a.is_zero() {
                    col.push(i, *a);
                    *a = F::zero();
                }
            }
            cols.push(col);
        }
        ColumnMatrix { nrow: self.nrow, ncol: rhs.ncol, cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, ModP, Rational};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type F2 = ModP<2>;
    type F5 = ModP<5>;

    fn mat<F: Field>(nrow: usize, entries: &[&[(usize, i64)]]) -> ColumnMatrix<F> {
        let cols = entries
            .iter()
            .map(|col| {
                let inds: Vec<usize> = col.iter().map(|&(i, _)| i).collect();
                let vals: Vec<F> = col.iter().map(|&(_, v)| F::from_int(v)).collect();
                SparseVector::from_pairs(&inds, &vals)
            })
            .collect();
        ColumnMatrix::from_cols(nrow, entries.len(), cols)
    }

    #[test]
    fn test_identity_shapes() {
        let i: ColumnMatrix<F2> = ColumnMatrix::identity(5);
        assert!(i.is_upper());
        assert!(i.is_lower());
        assert!(i.is_pivot_matrix());
        assert!(i.is_el());
        assert!(i.is_el_hat());
        assert!(i.is_eu());
        assert!(i.is_eu_hat());
    }

    #[test]
    fn test_upper_lower() {
        let u: ColumnMatrix<F5> = mat(2, &[&[(0, 1)], &[(0, 1), (1, 1)]]);
        assert!(u.is_upper());
        assert!(!u.is_lower());

        let l: ColumnMatrix<F5> = mat(2, &[&[(0, 1), (1, 1)], &[(1, 1)]]);
        assert!(l.is_lower());
        assert!(!l.is_upper());
    }

    #[test]
    fn test_pivot_matrix() {
        let swap: ColumnMatrix<F5> = mat(2, &[&[(1, 1)], &[(0, 1)]]);
        assert!(swap.is_pivot_matrix());

        let scaled: ColumnMatrix<F5> = mat(2, &[&[(1, 2)], &[(0, 1)]]);
        assert!(!scaled.is_pivot_matrix());

        let repeated: ColumnMatrix<F5> = mat(2, &[&[(0, 1)], &[(0, 1)]]);
        assert!(!repeated.is_pivot_matrix());
    }

    #[test]
    fn test_echelon_shapes() {
        /* Pivots at rows 0 and 2, zero column last. */
        let el: ColumnMatrix<F5> = mat(3, &[&[(0, 1), (1, 2)], &[(2, 3)], &[]]);
        assert!(el.is_el());
        assert!(!el.is_eu_hat());

        /* Zero column in the middle breaks EL. */
        let gap: ColumnMatrix<F5> = mat(3, &[&[(0, 1)], &[], &[(2, 3)]]);
        assert!(!gap.is_el());

        /* Pivot rows out of order break EL. */
        let unordered: ColumnMatrix<F5> = mat(3, &[&[(2, 1)], &[(0, 3)]]);
        assert!(!unordered.is_el());

        assert!(el.transpose().is_eu());
        assert!(el.conjugated().is_eu_hat());
        assert!(el.conjugated().transpose().is_el_hat());
    }

    #[test]
    fn test_transpose_conjugate_involutions() {
        let mut rng = StdRng::seed_from_u64(17);
        let a: ColumnMatrix<F5> = ColumnMatrix::random(6, 4, 0.4, 2, &mut rng);
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(a.conjugated().conjugated(), a);
        assert_eq!(a.transpose().conjugated(), a.conjugated().transpose());
    }

    #[test]
    fn test_mul() {
        let a: ColumnMatrix<Rational> = mat(2, &[&[(0, 1)], &[(0, 1), (1, 1)]]);
        let i = ColumnMatrix::identity(2);
        assert_eq!(&i * &a, a);
        assert_eq!(&a * &i, a);

        /* [[1,1],[0,1]] * [[1,1],[0,1]] = [[1,2],[0,1]] */
        let sq = &a * &a;
        assert_eq!(sq, mat(2, &[&[(0, 1)], &[(0, 2), (1, 1)]]));
    }

    #[test]
    fn test_row_scale_and_swap() {
        let mut a: ColumnMatrix<F5> = mat(2, &[&[(0, 1), (1, 2)], &[(1, 3)]]);
        a.row_scale(&[F5::new(2), F5::new(1)]);
        assert_eq!(a.get(0, 0), F5::new(2));
        assert_eq!(a.get(1, 0), F5::new(2));
        a.swap_cols(0, 1);
        assert_eq!(a.get(1, 0), F5::new(3));
    }

    #[test]
    fn test_random_density() {
        let mut rng = StdRng::seed_from_u64(3);
        let a: ColumnMatrix<F2> = ColumnMatrix::random(20, 20, 0.2, 1, &mut rng);
        assert!(a.nnz() > 0);
        assert!(a.nnz() < 400);
    }
}
