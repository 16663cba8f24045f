/*
 * @file field.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Exact coefficient fields for sparse factorization: a small `Field`
 * trait, prime fields of const modulus, and rationals.  All arithmetic
 * is exact; there is no floating point anywhere in this crate.
 */

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use num::rational::Ratio;
use num::{One, Zero};
use thiserror::Error;

/** Errors reported by field and matrix operations. */
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /** Inverse of the zero element was requested.  The factorization
     * algorithms never do this on their own; seeing it means an operand
     * violated a documented precondition. */
    #[error("inverse of the zero field element")]
    DivisionByZero,

    /** An operand had the wrong dimension for the requested operation. */
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/**
 * An exact field of coefficients.
 *
 * Everything the factorization kernel needs: exact ring arithmetic,
 * a zero test, the two constants, and a multiplicative inverse that
 * fails on zero.  `from_int` is the canonical map from the integers,
 * used by matrix factories and tests.
 */
pub trait Field:
    Copy + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;

    /** Multiplicative inverse; `DivisionByZero` on the zero element. */
    fn inverse(&self) -> Result<Self, LinalgError>;

    /** Image of an integer under the unique ring map from Z. */
    fn from_int(n: i64) -> Self;
}

/** The prime field with `P` elements, stored as a reduced residue. */
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ModP<const P: u32>(u32);

impl<const P: u32> ModP<P> {
    pub fn new(n: i64) -> Self {
        ModP(n.rem_euclid(P as i64) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl<const P: u32> Add for ModP<P> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        ModP((self.0 + rhs.0) % P)
    }
}

impl<const P: u32> Sub for ModP<P> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        ModP((self.0 + P - rhs.0) % P)
    }
}

impl<const P: u32> Neg for ModP<P> {
    type Output = Self;
    fn neg(self) -> Self {
        ModP((P - self.0) % P)
    }
}

impl<const P: u32> Mul for ModP<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        ModP((self.0 as u64 * rhs.0 as u64 % P as u64) as u32)
    }
}

impl<const P: u32> Field for ModP<P> {
    fn zero() -> Self {
        ModP(0)
    }

    fn one() -> Self {
        ModP(1 % P)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn inverse(&self) -> Result<Self, LinalgError> {
        if self.0 == 0 {
            return Err(LinalgError::DivisionByZero);
        }
        /* Extended Euclid on (P, self); P is prime so the gcd is 1. */
        let (mut r0, mut r1) = (P as i64, self.0 as i64);
        let (mut t0, mut t1) = (0i64, 1i64);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        Ok(ModP::new(t0))
    }

    fn from_int(n: i64) -> Self {
        ModP::new(n)
    }
}

/** Exact rational coefficients. */
pub type Rational = Ratio<i64>;

impl Field for Rational {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn inverse(&self) -> Result<Self, LinalgError> {
        if Zero::is_zero(self) {
            return Err(LinalgError::DivisionByZero);
        }
        Ok(self.recip())
    }

    fn from_int(n: i64) -> Self {
        Ratio::from_integer(n)
    }
}
