//! Arbitrary precision integers.
//!
//! A thin wrapper around `dashu::IBig` implementing the algebraic traits
//! and the handful of extra operations factorization needs.

use dashu::base::{Abs, BitTest, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::traits::{CommutativeRing, EuclideanDomain, IntegralDomain, Ring};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Z(pub IBig);

impl Z {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0 == IBig::ZERO {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Converts to an i64 if it fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Returns the least non-negative residue modulo `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is zero.
    #[must_use]
    pub fn mod_u64(&self, p: u64) -> u64 {
        assert!(p != 0, "modulus cannot be zero");
        let m = IBig::from(p);
        let mut r = self.0.clone() % m.clone();
        if DashuSigned::is_negative(&r) {
            r += m;
        }
        let r: i64 = r.try_into().expect("reduced residue fits in i64");
        r as u64
    }

    /// Returns the number of bits in the magnitude.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Returns bit `i` of the magnitude.
    #[must_use]
    pub fn bit(&self, i: usize) -> bool {
        self.0.bit(i)
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }
}

impl Ring for Z {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }

    fn from_i64(n: i64) -> Self {
        Self::new(n)
    }
}

impl CommutativeRing for Z {}
impl IntegralDomain for Z {}

impl EuclideanDomain for Z {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!Ring::is_zero(other), "division by zero");
        let q = self.0.clone() / other.0.clone();
        let r = self.0.clone() % other.0.clone();
        (Self(q), Self(r))
    }
}

impl Add for Z {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Z {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Z {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for Z {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Rem for Z {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        Self(self.0 % rhs.0)
    }
}

impl Neg for Z {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Zero for Z {
    fn zero() -> Self {
        <Self as Ring>::zero()
    }

    fn is_zero(&self) -> bool {
        <Self as Ring>::is_zero(self)
    }
}

impl One for Z {
    fn one() -> Self {
        <Self as Ring>::one()
    }

    fn is_one(&self) -> bool {
        <Self as Ring>::is_one(self)
    }
}

impl From<i64> for Z {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<IBig> for Z {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Z {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Z {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
