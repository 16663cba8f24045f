/*
 * @file factor.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Pivoted sparse factorizations.  One generalized elimination produces
 * the LEUP form; the PLEU, UELP and PUEL forms are the same elimination
 * conjugated by transpose and/or index reversal, so the four can never
 * drift apart.
 */

use crate::colmatrix::{ColumnMatrix, SparseVector};
use crate::field::{Field, LinalgError};
use crate::pivots::PivotIndex;
use tracing::{debug, trace};

/** Which factored form to produce. */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /** `A = L * E * U * P`, E left-anchored (EL). */
    Leup,
    /** `A = P * L * E * U`, E right-anchored (EU). */
    Pleu,
    /** `A = U * E * L * P`, E right-anchored from the bottom (EU-hat). */
    Uelp,
    /** `A = P * U * E * L`, E left-anchored from the bottom (EL-hat). */
    Puel,
}

/**
 * The four factors of a pivoted factorization.
 *
 * `l` is unit lower triangular, `u` unit upper triangular, `p` a
 * permutation, and `e` the pivot-reduced core whose shape depends on the
 * variant that produced the record.  A record owns its factors outright;
 * it is mutated only while being computed and is read-only afterward.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization<F> {
    pub l: ColumnMatrix<F>,
    pub e: ColumnMatrix<F>,
    pub u: ColumnMatrix<F>,
    pub p: ColumnMatrix<F>,
}

impl<F: Field> Factorization<F> {
    pub fn leup_prod(&self) -> ColumnMatrix<F> {
        &(&(&self.l * &self.e) * &self.u) * &self.p
    }

    pub fn pleu_prod(&self) -> ColumnMatrix<F> {
        &(&(&self.p * &self.l) * &self.e) * &self.u
    }

    pub fn uelp_prod(&self) -> ColumnMatrix<F> {
        &(&(&self.u * &self.e) * &self.l) * &self.p
    }

    pub fn puel_prod(&self) -> ColumnMatrix<F> {
        &(&(&self.p * &self.u) * &self.e) * &self.l
    }

    /** The ordered factor product for the given variant. */
    pub fn prod(&self, variant: Variant) -> ColumnMatrix<F> {
        match variant {
            Variant::Leup => self.leup_prod(),
            Variant::Pleu => self.pleu_prod(),
            Variant::Uelp => self.uelp_prod(),
            Variant::Puel => self.puel_prod(),
        }
    }
}

/**
 * The elimination underlying all four factorizations, operating in place
 * on `f.e` (initialized to a working copy of the input) with `f.l`,
 * `f.u`, `f.p` initialized to identities.
 *
 * Right-factor updates are lazy: rather than propagating every
 * elimination step into every later column, which would fill those
 * columns in, the outstanding (pivot row, inverse) pairs are recorded
 * and applied to a column of `u` only when that column is about to pivot
 * or is finalized.  The permutation is accumulated as its transpose and
 * transposed once at the end.
 */
fn leup_inplace<F: Field>(f: &mut Factorization<F>) -> Result<(), LinalgError> {
    let m = f.e.nrow();
    let n = f.e.ncol();
    debug!("LEUP elimination on a {}x{} matrix, {} entries", m, n, f.e.nnz());

    let mut pivs: Vec<usize> = Vec::new();
    let mut coeff: Vec<F> = Vec::new();
    let mut p2c = PivotIndex::build(&f.e, 0);

    let mut i = 0;
    let mut j = 0;
    while i < m && j < n {
        let j2 = match p2c.first_col(i) {
            Some(j2) => j2,
            None => {
                /* No column pivots at this row. */
                i += 1;
                continue;
            }
        };

        if j2 != j {
            /* Move the pivot column into the next free slot. */
            p2c.remove(&f.e, j, i);
            f.e.swap_cols(j, j2);
            p2c.update(&f.e, j2, i);
            f.p.swap_cols(j, j2);
        }

        /* Flush the deferred updates onto this column of U. */
        f.u.col_mut(j).axpy_deferred(f.e.col(j), &coeff, &pivs);

        /* Schur complement in the lower right-hand block. */
        let a11 = f.e.get(i, j);
        let a11_inv = a11.inverse()?;
        trace!("pivot {} at ({}, {})", pivs.len(), i, j);
        pivs.push(i);
        coeff.push(a11_inv);

        let others: Vec<usize> = p2c.cols_at(i)[1..].to_vec();
        for jj in others {
            let c = f.e.get(i, jj) * a11_inv;
            let (src, dst) = f.e.two_cols(j, jj);
            dst.axpy(-c, src, i + 1, m);
            p2c.update(&f.e, jj, i + 1);
        }
        p2c.clear_row(i);

        f.l.col_mut(i).axpy(a11_inv, f.e.col(j), i + 1, m);

        /* Reduce the pivot column to its pivot entry. */
        f.e.set_col(j, SparseVector::single(i, a11));

        i += 1;
        j += 1;
    }

    /* Finish the lazy updates for columns with no pivot. */
    while j < n {
        f.u.col_mut(j).axpy_deferred(f.e.col(j), &coeff, &pivs);
        f.e.col_mut(j).clear();
        j += 1;
    }

    f.p = f.p.transpose();
    debug!("elimination found {} pivots", pivs.len());
    Ok(())
}

/** LEUP factorization: `A = L * E * U * P` with `E` in EL shape. */
pub fn leup<F: Field>(a: &ColumnMatrix<F>) -> Result<Factorization<F>, LinalgError> {
    let mut f = Factorization {
        l: ColumnMatrix::identity(a.nrow()),
        e: a.clone(),
        u: ColumnMatrix::identity(a.ncol()),
        p: ColumnMatrix::identity(a.ncol()),
    };
    leup_inplace(&mut f)?;
    Ok(f)
}

/** PLEU factorization: `A = P * L * E * U` with `E` in EU shape.
 * This is the LEUP elimination of the transpose, transposed back; the
 * triangular factors trade places because transposition reverses the
 * product order. */
pub fn pleu<F: Field>(a: &ColumnMatrix<F>) -> Result<Factorization<F>, LinalgError> {
    let mut f = leup(&a.transpose())?;
    f.e = f.e.transpose();
    f.p = f.p.transpose();
    std::mem::swap(&mut f.l, &mut f.u);
    f.u = f.u.transpose();
    f.l = f.l.transpose();
    Ok(f)
}

/** UELP factorization: `A = U * E * L * P` with `E` in EU-hat shape.
 * The LEUP elimination of the index-reversed matrix, reversed back. */
pub fn uelp<F: Field>(a: &ColumnMatrix<F>) -> Result<Factorization<F>, LinalgError> {
    let mut f = leup(&a.conjugated())?;
    f.e.conjugate();
    f.p.conjugate();
    std::mem::swap(&mut f.l, &mut f.u);
    f.u.conjugate();
    f.l.conjugate();
    Ok(f)
}

/** PUEL factorization: `A = P * U * E * L` with `E` in EL-hat shape.
 * Composes the transpose and index-reversal symmetries; the two role
 * swaps cancel, so the triangular factors stay in place. */
pub fn puel<F: Field>(a: &ColumnMatrix<F>) -> Result<Factorization<F>, LinalgError> {
    let mut f = leup(&a.conjugated().transpose())?;
    f.e = f.e.transpose();
    f.e.conjugate();
    f.p = f.p.transpose();
    f.p.conjugate();
    f.u = f.u.transpose();
    f.u.conjugate();
    f.l = f.l.transpose();
    f.l.conjugate();
    Ok(f)
}

/** Factorize `a` into the requested variant. */
pub fn factorize<F: Field>(a: &ColumnMatrix<F>, variant: Variant) -> Result<Factorization<F>, LinalgError> {
    match variant {
        Variant::Leup => leup(a),
        Variant::Pleu => pleu(a),
        Variant::Uelp => uelp(a),
        Variant::Puel => puel(a),
    }
}
