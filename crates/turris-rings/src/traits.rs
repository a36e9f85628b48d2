//! Algebraic structure traits.
//!
//! The trait tower here is the vocabulary the rest of the workspace is
//! written in: polynomials are generic over a `Ring`, division-based
//! algorithms (GCD, resultants via fraction-free elimination) require a
//! `EuclideanDomain`, and everything touching inverses requires a `Field`.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A ring is a set with addition and multiplication operations.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// The canonical image of a small integer in this ring.
    fn from_i64(n: i64) -> Self {
        let mut result = Self::zero();
        let step = if n < 0 { -Self::one() } else { Self::one() };
        for _ in 0..n.unsigned_abs() {
            result = result + step.clone();
        }
        result
    }

    /// Computes self^n for non-negative n by binary exponentiation.
    fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// A commutative ring where multiplication is commutative.
pub trait CommutativeRing: Ring {}

/// An integral domain is a commutative ring with no zero divisors.
///
/// If a * b = 0, then a = 0 or b = 0.
pub trait IntegralDomain: CommutativeRing {}

/// A Euclidean domain supports division with remainder.
///
/// For any a, b with b ≠ 0, there exist q, r such that:
/// - a = b*q + r
/// - Either r = 0 or φ(r) < φ(b) for some Euclidean function φ
pub trait EuclideanDomain: IntegralDomain {
    /// Computes the quotient and remainder of division.
    ///
    /// # Panics
    ///
    /// May panic if `other` is zero.
    fn div_rem(&self, other: &Self) -> (Self, Self);

    /// Computes the quotient of division.
    fn div(&self, other: &Self) -> Self {
        self.div_rem(other).0
    }

    /// Computes the remainder of division.
    fn rem(&self, other: &Self) -> Self {
        self.div_rem(other).1
    }

    /// Computes the greatest common divisor.
    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();

        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }

        a
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: EuclideanDomain {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn field_div(&self, other: &Self) -> Self {
        self.clone() * other.inv().expect("division by zero")
    }
}
