//! Arbitrary precision rational numbers.
//!
//! `Q` is the ground field of every tower in this workspace. Rationals are
//! always stored in lowest terms with a positive denominator.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::integer::Z;
use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

/// An arbitrary precision rational number.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Q(RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Z, denominator: Z) -> Self {
        assert!(!Ring::is_zero(&denominator), "denominator cannot be zero");
        let numerator = if denominator.is_negative() {
            -numerator
        } else {
            numerator
        };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Z) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from an i64.
    #[must_use]
    pub fn from_int(n: i64) -> Self {
        Self::from_integer(Z::new(n))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Z::new(numerator), Z::new(denominator))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Z {
        Z::from(self.0.numerator().clone())
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> Z {
        Z::from(IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        Ring::is_one(&self.denominator())
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Z> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!Ring::is_zero(self), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if Ring::is_zero(self) {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    fn from_i64(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl CommutativeRing for Q {}
impl IntegralDomain for Q {}

impl EuclideanDomain for Q {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!Ring::is_zero(other), "division by zero");
        (self.clone() * other.recip(), <Self as Ring>::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        // Every non-zero element of a field is a unit.
        if Ring::is_zero(self) && Ring::is_zero(other) {
            <Self as Ring>::zero()
        } else {
            <Self as Ring>::one()
        }
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if Ring::is_zero(self) {
            None
        } else {
            Some(self.recip())
        }
    }
}

impl Add for Q {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Q {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Q {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for Q {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Q {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Zero for Q {
    fn zero() -> Self {
        <Self as Ring>::zero()
    }

    fn is_zero(&self) -> bool {
        <Self as Ring>::is_zero(self)
    }
}

impl One for Q {
    fn one() -> Self {
        <Self as Ring>::one()
    }

    fn is_one(&self) -> bool {
        <Self as Ring>::is_one(self)
    }
}

impl From<Z> for Q {
    fn from(value: Z) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Debug for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_to_lowest_terms() {
        let x = Q::from_i64(6, 4);
        assert_eq!(x.numerator(), Z::new(3));
        assert_eq!(x.denominator(), Z::new(2));
    }

    #[test]
    fn test_negative_denominator_normalized() {
        let x = Q::from_i64(1, -2);
        assert!(x.is_negative());
        assert_eq!(x.denominator(), Z::new(2));
    }

    #[test]
    fn test_field_ops() {
        let a = Q::from_i64(2, 3);
        let b = Q::from_i64(3, 4);
        assert_eq!(a.clone() * b.clone(), Q::from_i64(1, 2));
        assert_eq!(a.clone() + b.clone(), Q::from_i64(17, 12));
        assert_eq!(a.recip(), Q::from_i64(3, 2));
        assert_eq!(Field::inv(&Q::from_int(0)), None);
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(Q::from_i64(8, 2).to_integer(), Some(Z::new(4)));
        assert_eq!(Q::from_i64(7, 2).to_integer(), None);
    }
}
