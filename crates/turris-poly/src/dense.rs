//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending degree order with trailing zeros
//! removed; the zero polynomial is the single coefficient `[0]`.

use std::ops::{Add, Mul, Neg, Sub};

use turris_rings::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

use crate::algorithms::gcd::poly_div_rem;

/// A dense univariate polynomial over a ring `R`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().map_or(false, Ring::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree of the polynomial.
    ///
    /// The zero polynomial has degree 0 by convention.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true if the degree is zero.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        self.coeffs.last().expect("coeffs is never empty")
    }

    /// Returns the coefficient of x^i (zero beyond the degree).
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Substitutes another polynomial for the variable.
    #[must_use]
    pub fn compose(&self, inner: &Self) -> Self {
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = Self::add(&Self::mul(&result, inner), &Self::constant(c.clone()));
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let a = self.coeff(i);
            let b = other.coeff(i);
            result.push(a + b);
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut result = vec![R::zero(); self.coeffs.len() + other.coeffs.len() - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies every coefficient by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        Self::new(self.coeffs.iter().map(|a| a.clone() * c.clone()).collect())
    }

    /// Computes self^n by repeated squaring.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = Self::mul(&result, &base);
            }
            base = Self::mul(&base, &base);
            exp >>= 1;
        }

        result
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }

        let coeffs: Vec<R> = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c.clone().mul_by_usize(i))
            .collect();

        Self::new(coeffs)
    }

    /// Maps the coefficients through a function, renormalizing.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, f: impl Fn(&R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().map(f).collect())
    }
}

trait MulByUsize {
    fn mul_by_usize(self, n: usize) -> Self;
}

impl<R: Ring> MulByUsize for R {
    fn mul_by_usize(self, n: usize) -> Self {
        let mut acc = R::zero();
        let mut addend = self;
        let mut k = n;
        while k > 0 {
            if k & 1 == 1 {
                acc = acc + addend.clone();
            }
            addend = addend.clone() + addend;
            k >>= 1;
        }
        acc
    }
}

// A polynomial ring over a ring is a ring, and over a field it is a
// Euclidean domain. These impls let `DensePoly<Q>` itself serve as the
// entry domain of the generic resultant, which is how the bivariate
// elimination step in the flattener is expressed.

impl<R: Ring> Add for DensePoly<R> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        DensePoly::add(&self, &rhs)
    }
}

impl<R: Ring> Sub for DensePoly<R> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        DensePoly::sub(&self, &rhs)
    }
}

impl<R: Ring> Mul for DensePoly<R> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        DensePoly::mul(&self, &rhs)
    }
}

impl<R: Ring> Neg for DensePoly<R> {
    type Output = Self;
    fn neg(self) -> Self {
        DensePoly::neg(&self)
    }
}

impl<R: Ring> Ring for DensePoly<R> {
    fn zero() -> Self {
        DensePoly::zero()
    }

    fn one() -> Self {
        DensePoly::one()
    }

    fn is_zero(&self) -> bool {
        DensePoly::is_zero(self)
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    fn from_i64(n: i64) -> Self {
        DensePoly::constant(R::from_i64(n))
    }
}

impl<R: CommutativeRing> CommutativeRing for DensePoly<R> {}
impl<R: IntegralDomain> IntegralDomain for DensePoly<R> {}

impl<F: Field> EuclideanDomain for DensePoly<F> {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        poly_div_rem(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turris_rings::Q;

    fn q(n: i64) -> Q {
        Q::from_int(n)
    }

    fn poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| q(c)).collect())
    }

    #[test]
    fn test_normalization() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        assert_eq!(p.coeffs().len(), 2);
    }

    #[test]
    fn test_mul() {
        // (1 + x)(1 - x) = 1 - x^2
        let p = poly(&[1, 1]) * poly(&[1, -1]);
        assert_eq!(p, poly(&[1, 0, -1]));
    }

    #[test]
    fn test_eval_horner() {
        // 2 - 3x + x^2 at x = 5 is 12
        let p = poly(&[2, -3, 1]);
        assert_eq!(p.eval(&q(5)), q(12));
    }

    #[test]
    fn test_compose() {
        // f = x^2 + 1, g = x - 2, f(g) = x^2 - 4x + 5
        let f = poly(&[1, 0, 1]);
        let g = poly(&[-2, 1]);
        assert_eq!(f.compose(&g), poly(&[5, -4, 1]));
    }

    #[test]
    fn test_derivative() {
        // d/dx (1 + 2x + 3x^2) = 2 + 6x
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.derivative(), poly(&[2, 6]));
    }
}
