/*
 * @file commute.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Shape commutation relations: transport a triangular change of basis
 * across a pivot-reduced matrix, so that bases triangularized
 * independently on either side of a map can be composed.  One solver
 * handles the EL/lower direction; the other three directions are the
 * same solver conjugated by transpose and/or index reversal.
 */

use crate::colmatrix::{ColumnMatrix, SparseVector};
use crate::field::{Field, LinalgError};

/** Sentinel for "this column has no pivot". */
pub const NO_IND: usize = usize::MAX;

/** Row of column `j`'s pivot (topmost entry), `NO_IND` if the column is zero. */
fn pivot_ind<F: Field>(e: &ColumnMatrix<F>, j: usize) -> usize {
    e.col(j).first().map_or(NO_IND, |(r, _)| r)
}

/** Normalize the pivots of an EL matrix to one, returning the per-row
 * scale vector that recovers the original by row scaling.  Rows without
 * a pivot scale by one. */
fn extract_row_scale<F: Field>(e: &mut ColumnMatrix<F>) -> Vec<F> {
    let m = e.nrow();
    let n = e.ncol();
    let mut coeff = vec![F::one(); m];
    for j in 0..n {
        let (i, v) = match e.col(j).first() {
            Some(head) => head,
            /* EL structure puts the zero columns at the end. */
            None => break,
        };
        coeff[i] = v;
        let mut col = SparseVector::single(i, F::one());
        for (r, w) in e.col(j).iter().skip(1) {
            col.push(r, w);
        }
        e.set_col(j, col);
    }
    coeff
}

/**
 * Produce lower-triangular `ltilde` with `ltilde * el = el * l`.
 *
 * `el` must be pivot-reduced in EL shape (m x n) and `l` lower
 * triangular (n x n).  Entries of `l` referencing rows with no pivot in
 * `el` are dropped; the commutation identity is guaranteed on the
 * pivoted subspace of `el`.
 */
pub fn el_l_commute<F: Field>(
    el: &ColumnMatrix<F>,
    l: &ColumnMatrix<F>,
) -> Result<ColumnMatrix<F>, LinalgError> {
    let m = el.nrow();
    let n = el.ncol();
    if l.nrow() != n {
        return Err(LinalgError::DimensionMismatch { expected: n, got: l.nrow() });
    }
    if l.ncol() != n {
        return Err(LinalgError::DimensionMismatch { expected: n, got: l.ncol() });
    }

    let mut unit = el.clone();
    let coeff = extract_row_scale(&mut unit);

    /* Map from position among pivot columns to pivot row. */
    let idx_map: Vec<usize> = (0..n).map(|j| pivot_ind(&unit, j)).collect();

    let mut ltilde = ColumnMatrix::identity(m);
    for ell in 0..n {
        let j_ell = idx_map[ell];
        if j_ell == NO_IND {
            break;
        }
        /* For the scaled identity ltilde = D * ltilde_unit * D^-1: the
         * column picks up the inverse pivot scale, the final row scaling
         * the direct one. */
        let d_inv = coeff[j_ell].inverse()?;
        let mut col = SparseVector::new();
        for (i, v) in l.col(ell).iter() {
            if idx_map[i] == NO_IND {
                /* Entries referencing unpivoted rows are dropped. */
                break;
            }
            col.push(idx_map[i], v * d_inv);
        }
        ltilde.set_col(j_ell, col);
    }
    ltilde.row_scale(&coeff);
    Ok(ltilde)
}

/** Produce lower-triangular `ltilde` with `el * ltilde = l * el`, for
 * `el` pivot-reduced in EL-hat shape (m x n) and `l` lower (m x m). */
pub fn l_el_commute<F: Field>(
    l: &ColumnMatrix<F>,
    el: &ColumnMatrix<F>,
) -> Result<ColumnMatrix<F>, LinalgError> {
    let mut et = el.transpose();
    et.conjugate();
    let mut lt = l.transpose();
    lt.conjugate();
    let mut out = el_l_commute(&et, &lt)?.transpose();
    out.conjugate();
    Ok(out)
}

/** Produce upper-triangular `utilde` with `u * eu = eu * utilde`, for
 * `eu` pivot-reduced in EU shape (m x n) and `u` upper (m x m). */
pub fn u_eu_commute<F: Field>(
    u: &ColumnMatrix<F>,
    eu: &ColumnMatrix<F>,
) -> Result<ColumnMatrix<F>, LinalgError> {
    Ok(el_l_commute(&eu.transpose(), &u.transpose())?.transpose())
}

/** Produce upper-triangular `utilde` with `eu * u = utilde * eu`, for
 * `eu` pivot-reduced in EU-hat shape (m x n) and `u` upper (n x n). */
pub fn eu_u_commute<F: Field>(
    eu: &ColumnMatrix<F>,
    u: &ColumnMatrix<F>,
) -> Result<ColumnMatrix<F>, LinalgError> {
    Ok(el_l_commute(&eu.conjugated(), &u.conjugated())?.conjugated())
}
