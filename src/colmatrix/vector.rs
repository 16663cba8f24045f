/*
 * @file vector.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Sparse column vectors in canonical form: entries sorted by strictly
 * increasing row index, and no stored zeros.  Every mutating operation
 * here preserves that form; the elimination and commutation code relies
 * on it without re-checking.
 */

use crate::field::Field;

/** A sparse vector of field coefficients, indexed by row. */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseVector<F> {
    entries: Vec<(usize, F)>,
}

impl<F: Field> SparseVector<F> {
    /** The zero vector. */
    pub fn new() -> Self {
        SparseVector { entries: Vec::new() }
    }

    /** A vector with a single entry. */
    pub fn single(row: usize, val: F) -> Self {
        let entries = if val.is_zero() { Vec::new() } else { vec![(row, val)] };
        SparseVector { entries }
    }

    /** Build from parallel index/value slices.  Indices must be strictly
     * increasing; zero values are dropped. */
    pub fn from_pairs(inds: &[usize], vals: &[F]) -> Self {
        assert_eq!(inds.len(), vals.len());
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]));
        let entries = inds
            .iter()
            .zip(vals.iter())
            .filter(|(_, v)| !v.is_zero())
            .map(|(&i, &v)| (i, v))
            .collect();
        SparseVector { entries }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, F)> + '_ {
        self.entries.iter().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /** Append an entry below every existing one. */
    pub fn push(&mut self, row: usize, val: F) {
        debug_assert!(self.entries.last().map_or(true, |&(r, _)| r < row));
        if !val.is_zero() {
            self.entries.push((row, val));
        }
    }

    /** First entry, if any. */
    pub fn first(&self) -> Option<(usize, F)> {
        self.entries.first().copied()
    }

    /** Last entry, if any. */
    pub fn last(&self) -> Option<(usize, F)> {
        self.entries.last().copied()
    }

    /** The coefficient at `row`, zero if absent. */
    pub fn get(&self, row: usize) -> F {
        match self.entries.binary_search_by_key(&row, |&(r, _)| r) {
            Ok(k) => self.entries[k].1,
            Err(_) => F::zero(),
        }
    }

    /** First entry at or after `row`, if any. */
    pub fn lower_bound(&self, row: usize) -> Option<(usize, F)> {
        let k = self.entries.partition_point(|&(r, _)| r < row);
        self.entries.get(k).copied()
    }

    /**
     * `self += c * other`, restricted to `other`'s entries with row in
     * `row_lo..row_hi`.  Entries of `self` outside the restriction are
     * untouched; exact cancellations are dropped.
     */
    pub fn axpy(&mut self, c: F, other: &SparseVector<F>, row_lo: usize, row_hi: usize) {
        if c.is_zero() {
            return;
        }
        let lo = other.entries.partition_point(|&(r, _)| r < row_lo);
        let hi = other.entries.partition_point(|&(r, _)| r < row_hi);
        let rhs = &other.entries[lo..hi];
        if rhs.is_empty() {
            return;
        }

        let mut out = Vec::with_capacity(self.entries.len() + rhs.len());
        let (mut i, mut k) = (0, 0);
        while i < self.entries.len() && k < rhs.len() {
            let (ri, _) = self.entries[i];
            let (rk, vk) = rhs[k];
            if ri < rk {
                out.push(self.entries[i]);
                i += 1;
            } else if rk < ri {
                out.push((rk, c * vk));
                k += 1;
            } else {
                let v = self.entries[i].1 + c * vk;
                if !v.is_zero() {
                    out.push((ri, v));
                }
                i += 1;
                k += 1;
            }
        }
        out.extend_from_slice(&self.entries[i..]);
        out.extend(rhs[k..].iter().map(|&(r, v)| (r, c * v)));
        self.entries = out;
    }

    /**
     * Apply a recorded list of deferred eliminations:
     * `self += sum_t coeff[t] * src(rows[t]) * e_t`.
     *
     * This is the lazy-update flush of the elimination: `rows[t]` is the
     * pivot row of the `t`-th pivot and `coeff[t]` its inverse, so the
     * stale entries of `src` at already-eliminated rows are re-expressed
     * against the finalized pivot columns.
     */
    pub fn axpy_deferred(&mut self, src: &SparseVector<F>, coeff: &[F], rows: &[usize]) {
        debug_assert_eq!(coeff.len(), rows.len());
        let mut add = Vec::new();
        for (t, (&c, &r)) in coeff.iter().zip(rows.iter()).enumerate() {
            let v = src.get(r);
            if !v.is_zero() {
                add.push((t, c * v));
            }
        }
        if add.is_empty() {
            return;
        }
        let addend = SparseVector { entries: add };
        self.axpy(F::one(), &addend, 0, usize::MAX);
    }

    /** Scale the entry at each row `r` by `coeff[r]`. */
    pub fn row_scale(&mut self, coeff: &[F]) {
        for (r, v) in self.entries.iter_mut() {
            *v = *v * coeff[*r];
        }
        self.entries.retain(|(_, v)| !v.is_zero());
    }

    /**
     * Extract the subvector indexed by `indices`: entry `k` of the result
     * is the coefficient of `self` at `indices[k]`.  This is how a
     * homology layer reads a representative out of a preferred basis.
     */
    pub fn select(&self, indices: &[usize]) -> SparseVector<F> {
        let mut out = SparseVector::new();
        for (k, &i) in indices.iter().enumerate() {
            let v = self.get(i);
            if !v.is_zero() {
                out.push(k, v);
            }
        }
        out
    }

    /** The vector with row order reversed within `nrow` rows. */
    pub fn reversed(&self, nrow: usize) -> SparseVector<F> {
        let entries = self
            .entries
            .iter()
            .rev()
            .map(|&(r, v)| (nrow - 1 - r, v))
            .collect();
        SparseVector { entries }
    }
}

impl<F: Field> Default for SparseVector<F> {
    fn default() -> Self {
        SparseVector::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, ModP, Rational};

    type F5 = ModP<5>;

    fn v5(pairs: &[(usize, i64)]) -> SparseVector<F5> {
        let inds: Vec<usize> = pairs.iter().map(|&(i, _)| i).collect();
        let vals: Vec<F5> = pairs.iter().map(|&(_, v)| F5::new(v)).collect();
        SparseVector::from_pairs(&inds, &vals)
    }

    #[test]
    fn test_canonical_form() {
        let v = v5(&[(0, 1), (2, 0), (5, 3)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(0), F5::new(1));
        assert_eq!(v.get(2), F5::zero());
        assert_eq!(v.get(5), F5::new(3));
    }

    #[test]
    fn test_lower_bound() {
        let v = v5(&[(1, 1), (4, 2), (7, 3)]);
        assert_eq!(v.lower_bound(0), Some((1, F5::new(1))));
        assert_eq!(v.lower_bound(1), Some((1, F5::new(1))));
        assert_eq!(v.lower_bound(2), Some((4, F5::new(2))));
        assert_eq!(v.lower_bound(5), Some((7, F5::new(3))));
        assert_eq!(v.lower_bound(8), None);
    }

    #[test]
    fn test_axpy_ranged() {
        let mut a = v5(&[(0, 1), (2, 3)]);
        let b = v5(&[(0, 2), (2, 2), (4, 1)]);
        /* Only rows 1..5 of b participate. */
        a.axpy(F5::new(1), &b, 1, 5);
        assert_eq!(a, v5(&[(0, 1), (4, 1)]));
        assert_eq!(a.get(2), F5::zero());
        assert_eq!(a.nnz(), 2);
    }

    #[test]
    fn test_axpy_cancellation() {
        let mut a: SparseVector<Rational> =
            SparseVector::from_pairs(&[0, 3], &[Rational::from_int(2), Rational::from_int(-1)]);
        let b = SparseVector::from_pairs(&[3], &[Rational::from_int(1)]);
        a.axpy(Rational::one(), &b, 0, 10);
        assert_eq!(a.nnz(), 1);
        assert_eq!(a.get(0), Rational::from_int(2));
    }

    #[test]
    fn test_axpy_deferred() {
        /* src holds stale entries at pivot rows 1 and 3; the flush maps
         * them to ordinals 0 and 1 scaled by the recorded inverses. */
        let src = v5(&[(1, 2), (3, 4), (6, 1)]);
        let mut u = SparseVector::single(4, F5::one());
        u.axpy_deferred(&src, &[F5::new(3), F5::new(4)], &[1, 3]);
        assert_eq!(u.get(0), F5::new(6));
        assert_eq!(u.get(1), F5::new(16));
        assert_eq!(u.get(4), F5::one());
        assert_eq!(u.nnz(), 3);
    }

    #[test]
    fn test_select_and_reverse() {
        let v = v5(&[(0, 1), (2, 2), (5, 3)]);
        let s = v.select(&[2, 3, 5]);
        assert_eq!(s, v5(&[(0, 2), (2, 3)]));
        let r = v.reversed(6);
        assert_eq!(r, v5(&[(0, 3), (3, 2), (5, 1)]));
    }
}
