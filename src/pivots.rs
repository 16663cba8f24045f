/*
 * @file pivots.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Incremental pivot bookkeeping for the elimination: a map from row
 * index to the columns whose next-available nonzero sits at that row.
 * Built once per elimination pass, then maintained entry by entry as
 * columns are swapped, eliminated or cleared; it never re-scans the
 * matrix after the initial build.
 */

use crate::colmatrix::ColumnMatrix;
use crate::field::Field;

/**
 * Row-to-columns registration for one in-progress elimination.
 *
 * A column is registered under row `r` iff its first nonzero at or after
 * the caller's current threshold is exactly `r`; columns with no such
 * entry are unregistered.  The index is private to a single
 * factorization call.
 */
pub struct PivotIndex {
    rows: Vec<Vec<usize>>,
}

impl PivotIndex {
    /** Register every column of `mat` under the row of its first nonzero
     * at or after `threshold`.  O(ncol) lookups, no full re-scan later. */
    pub fn build<F: Field>(mat: &ColumnMatrix<F>, threshold: usize) -> Self {
        let mut idx = PivotIndex { rows: vec![Vec::new(); mat.nrow()] };
        for j in 0..mat.ncol() {
            idx.update(mat, j, threshold);
        }
        idx
    }

    /** Re-register column `j` after its contents changed. */
    pub fn update<F: Field>(&mut self, mat: &ColumnMatrix<F>, j: usize, threshold: usize) {
        if let Some((r, _)) = mat.col(j).lower_bound(threshold) {
            self.rows[r].push(j);
        }
    }

    /** Deregister column `j`'s current registration, looking past
     * `threshold`.  Call before mutating the column. */
    pub fn remove<F: Field>(&mut self, mat: &ColumnMatrix<F>, j: usize, threshold: usize) {
        if let Some((r, _)) = mat.col(j).lower_bound(threshold) {
            if let Some(pos) = self.rows[r].iter().position(|&c| c == j) {
                self.rows[r].remove(pos);
            }
        }
    }

    /** The first column registered at row `i`, if any. */
    pub fn first_col(&self, i: usize) -> Option<usize> {
        self.rows[i].first().copied()
    }

    /** All columns registered at row `i`, in registration order. */
    pub fn cols_at(&self, i: usize) -> &[usize] {
        &self.rows[i]
    }

    /** Drop every registration at row `i` (the row is eliminated). */
    pub fn clear_row(&mut self, i: usize) {
        self.rows[i].clear();
    }
}
