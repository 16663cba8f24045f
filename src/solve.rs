/*
 * @file solve.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Sparse triangular solves against the factor matrices.  This is the
 * interface a homology layer drives: solve a chain against the upper
 * factor of a reduced basis, then read off the generator coordinates
 * with `SparseVector::select`.
 */

use crate::colmatrix::{ColumnMatrix, SparseVector};
use crate::field::{Field, LinalgError};

/**
 * Solve `u * x = b` for upper-triangular `u` by back substitution.
 *
 * Works from the bottommost remaining entry of the right-hand side
 * upward; each step fixes one coordinate of `x` and cancels it from the
 * working vector, so the cost is proportional to the fill actually
 * encountered.  A structurally zero diagonal reports `DivisionByZero`.
 */
pub fn u_solve<F: Field>(
    u: &ColumnMatrix<F>,
    b: &SparseVector<F>,
) -> Result<SparseVector<F>, LinalgError> {
    let n = u.ncol();
    if u.nrow() != n {
        return Err(LinalgError::DimensionMismatch { expected: n, got: u.nrow() });
    }
    if let Some((r, _)) = b.last() {
        if r >= n {
            return Err(LinalgError::DimensionMismatch { expected: n, got: r + 1 });
        }
    }

    let mut work = b.clone();
    let mut sol: Vec<(usize, F)> = Vec::new();
    while let Some((j, v)) = work.last() {
        let x = v * u.get(j, j).inverse()?;
        sol.push((j, x));
        /* Cancel coordinate j; an upper column only reaches rows <= j. */
        work.axpy(-x, u.col(j), 0, j + 1);
    }

    let mut out = SparseVector::new();
    for &(j, x) in sol.iter().rev() {
        out.push(j, x);
    }
    Ok(out)
}

/** Solve `l * x = b` for lower-triangular `l` by forward substitution. */
pub fn l_solve<F: Field>(
    l: &ColumnMatrix<F>,
    b: &SparseVector<F>,
) -> Result<SparseVector<F>, LinalgError> {
    let n = l.ncol();
    if l.nrow() != n {
        return Err(LinalgError::DimensionMismatch { expected: n, got: l.nrow() });
    }
    if let Some((r, _)) = b.last() {
        if r >= n {
            return Err(LinalgError::DimensionMismatch { expected: n, got: r + 1 });
        }
    }

    let mut work = b.clone();
    let mut out = SparseVector::new();
    while let Some((j, v)) = work.first() {
        let x = v * l.get(j, j).inverse()?;
        out.push(j, x);
        work.axpy(-x, l.col(j), j, n);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::leup;
    use crate::field::{ModP, Rational};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type F2 = ModP<2>;
    type F5 = ModP<5>;

    fn rhs<F: Field>() -> SparseVector<F> {
        SparseVector::from_pairs(
            &[0, 2, 3],
            &[F::from_int(-1), F::from_int(1), F::from_int(-1)],
        )
    }

    #[test]
    fn test_identity_solve() {
        let i5: ColumnMatrix<Rational> = ColumnMatrix::identity(5);
        let y = rhs::<Rational>();
        assert_eq!(u_solve(&i5, &y).unwrap(), y);
        assert_eq!(l_solve(&i5, &y).unwrap(), y);

        let i5: ColumnMatrix<F2> = ColumnMatrix::identity(5);
        let y = rhs::<F2>();
        assert_eq!(u_solve(&i5, &y).unwrap(), y);
        assert_eq!(l_solve(&i5, &y).unwrap(), y);
    }

    #[test]
    fn test_solve_round_trip() {
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let a: ColumnMatrix<F5> = ColumnMatrix::random(12, 12, 0.3, 1, &mut rng);
            let f = leup(&a).unwrap();
            let x: ColumnMatrix<F5> = ColumnMatrix::random(12, 1, 0.5, 2, &mut rng);

            let bu = &f.u * &x;
            assert_eq!(&u_solve(&f.u, bu.col(0)).unwrap(), x.col(0));

            let bl = &f.l * &x;
            assert_eq!(&l_solve(&f.l, bl.col(0)).unwrap(), x.col(0));
        }
    }

    #[test]
    fn test_zero_diagonal() {
        /* Upper triangular with a structural zero at (1,1). */
        let u = ColumnMatrix::from_cols(
            2,
            2,
            vec![
                SparseVector::single(0, F5::one()),
                SparseVector::single(0, F5::one()),
            ],
        );
        let b = SparseVector::single(1, F5::one());
        assert_eq!(u_solve(&u, &b), Err(LinalgError::DivisionByZero));
    }

    #[test]
    fn test_dimension_mismatch() {
        let u: ColumnMatrix<F5> = ColumnMatrix::identity(3);
        let b = SparseVector::single(7, F5::one());
        assert_eq!(
            u_solve(&u, &b),
            Err(LinalgError::DimensionMismatch { expected: 3, got: 8 })
        );
    }

    #[test]
    fn test_solve_then_select() {
        /* The induced-map pattern: solve against U, then extract the
         * coordinates of a preferred index subset. */
        let mut u: ColumnMatrix<Rational> = ColumnMatrix::identity(4);
        u.col_mut(3).clear();
        u.col_mut(3).push(1, Rational::new(1, 2));
        u.col_mut(3).push(3, Rational::one());

        let b = SparseVector::from_pairs(&[1, 3], &[Rational::new(3, 2), Rational::one()]);
        let x = u_solve(&u, &b).unwrap();
        assert_eq!(x, SparseVector::from_pairs(&[1, 3], &[Rational::one(), Rational::one()]));

        let picked = x.select(&[1, 2]);
        assert_eq!(picked, SparseVector::single(0, Rational::one()));
    }
}
