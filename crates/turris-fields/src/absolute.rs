//! Arithmetic in an absolute extension Q[x]/(R).
//!
//! Residues are plain `DensePoly<Q>` of degree below `deg R`; the modulus
//! travels as an explicit context rather than inside every element, the
//! same way the runtime prime travels through the mod-p factorization
//! routines. Polynomials over the extension (needed for gcd computations
//! in the flattener and the coercion resolver) are coefficient vectors of
//! residues, ascending in the outer variable.

use turris_poly::{extended_gcd, poly_div_rem, DensePoly};
use turris_rings::traits::Ring;
use turris_rings::Q;

/// The field Q[x]/(R) for a monic squarefree polynomial R.
///
/// When R is irreducible this is a number field and every non-zero
/// residue is invertible; the arithmetic itself only assumes R monic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsoluteField {
    modulus: DensePoly<Q>,
}

impl AbsoluteField {
    /// Wraps a defining polynomial, normalizing it to monic.
    #[must_use]
    pub fn new(modulus: &DensePoly<Q>) -> Self {
        Self {
            modulus: turris_poly::make_monic(modulus),
        }
    }

    /// The monic defining polynomial.
    #[must_use]
    pub fn modulus(&self) -> &DensePoly<Q> {
        &self.modulus
    }

    /// The degree of the extension over Q.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.modulus.degree()
    }

    /// The residue of the generator, x mod R.
    #[must_use]
    pub fn generator(&self) -> DensePoly<Q> {
        self.reduce(&DensePoly::x())
    }

    /// Reduces a polynomial to its canonical residue.
    #[must_use]
    pub fn reduce(&self, f: &DensePoly<Q>) -> DensePoly<Q> {
        if f.degree() < self.modulus.degree() {
            return f.clone();
        }
        poly_div_rem(f, &self.modulus).1
    }

    /// Adds two residues.
    #[must_use]
    pub fn add(&self, a: &DensePoly<Q>, b: &DensePoly<Q>) -> DensePoly<Q> {
        a.add(b)
    }

    /// Subtracts two residues.
    #[must_use]
    pub fn sub(&self, a: &DensePoly<Q>, b: &DensePoly<Q>) -> DensePoly<Q> {
        a.sub(b)
    }

    /// Multiplies two residues.
    #[must_use]
    pub fn mul(&self, a: &DensePoly<Q>, b: &DensePoly<Q>) -> DensePoly<Q> {
        self.reduce(&a.mul(b))
    }

    /// Inverts a residue, or `None` if it is zero or shares a factor
    /// with the modulus.
    #[must_use]
    pub fn inv(&self, a: &DensePoly<Q>) -> Option<DensePoly<Q>> {
        let a = self.reduce(a);
        if a.is_zero() {
            return None;
        }

        let (g, s, _) = extended_gcd(&a, &self.modulus);
        if !g.is_one() {
            return None;
        }
        Some(self.reduce(&s))
    }

    /// Divides two residues, or `None` when the divisor is not invertible.
    #[must_use]
    pub fn div(&self, a: &DensePoly<Q>, b: &DensePoly<Q>) -> Option<DensePoly<Q>> {
        Some(self.mul(a, &self.inv(b)?))
    }

    /// Raises a residue to a non-negative power.
    #[must_use]
    pub fn pow(&self, a: &DensePoly<Q>, n: u32) -> DensePoly<Q> {
        let mut result = DensePoly::one();
        let mut base = self.reduce(a);
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(&result, &base);
            }
            base = self.mul(&base, &base);
            exp >>= 1;
        }

        result
    }

    /// Evaluates a rational polynomial at a residue.
    #[must_use]
    pub fn eval(&self, f: &DensePoly<Q>, at: &DensePoly<Q>) -> DensePoly<Q> {
        let mut result = DensePoly::zero();
        for c in f.coeffs().iter().rev() {
            result = self.mul(&result, at).add(&DensePoly::constant(c.clone()));
        }
        self.reduce(&result)
    }
}

/// A polynomial over [`AbsoluteField`]: residue coefficients ascending in
/// the outer variable, trailing zeros trimmed (the zero polynomial is the
/// empty vector).
pub type APoly = Vec<DensePoly<Q>>;

impl AbsoluteField {
    /// Trims trailing zero coefficients in place and returns the vector.
    #[must_use]
    pub fn poly_normalize(&self, mut f: APoly) -> APoly {
        while f.last().is_some_and(DensePoly::is_zero) {
            f.pop();
        }
        f
    }

    /// Degree of a polynomial over the extension; `None` for zero.
    #[must_use]
    pub fn poly_degree(&self, f: &APoly) -> Option<usize> {
        if f.is_empty() {
            None
        } else {
            Some(f.len() - 1)
        }
    }

    /// Scales every coefficient to make the polynomial monic.
    #[must_use]
    pub fn poly_monic(&self, f: &APoly) -> APoly {
        let Some(lead) = f.last() else {
            return vec![];
        };
        let inv = self.inv(lead).expect("leading coefficient invertible");
        f.iter().map(|c| self.mul(c, &inv)).collect()
    }

    /// Division with remainder over the extension.
    ///
    /// # Panics
    ///
    /// Panics if the divisor is zero or its leading coefficient is not
    /// invertible (which cannot happen over an irreducible modulus).
    #[must_use]
    pub fn poly_div_rem(&self, a: &APoly, b: &APoly) -> (APoly, APoly) {
        assert!(!b.is_empty(), "division by zero polynomial");

        if a.len() < b.len() {
            return (vec![], a.clone());
        }

        let lead_inv = self
            .inv(b.last().expect("non-empty"))
            .expect("leading coefficient invertible");
        let mut rem = a.clone();
        let mut quot = vec![DensePoly::zero(); a.len() - b.len() + 1];

        for i in (0..quot.len()).rev() {
            let idx = i + b.len() - 1;
            if rem[idx].is_zero() {
                continue;
            }
            let q = self.mul(&rem[idx], &lead_inv);
            quot[i] = q.clone();
            for (j, bc) in b.iter().enumerate() {
                rem[i + j] = rem[i + j].sub(&self.mul(&q, bc));
            }
        }

        (self.poly_normalize(quot), self.poly_normalize(rem))
    }

    /// Monic GCD of two polynomials over the extension.
    #[must_use]
    pub fn poly_gcd(&self, a: &APoly, b: &APoly) -> APoly {
        let mut f = self.poly_normalize(a.clone());
        let mut g = self.poly_normalize(b.clone());

        while !g.is_empty() {
            let (_, r) = self.poly_div_rem(&f, &g);
            f = g;
            g = r;
        }

        if f.is_empty() {
            f
        } else {
            self.poly_monic(&f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    // Q(i) = Q[x]/(x^2 + 1)
    fn gaussian() -> AbsoluteField {
        AbsoluteField::new(&qpoly(&[1, 0, 1]))
    }

    #[test]
    fn test_generator_square() {
        let f = gaussian();
        let i = f.generator();
        assert_eq!(f.mul(&i, &i), qpoly(&[-1]));
    }

    #[test]
    fn test_inverse() {
        let f = gaussian();
        // (1 + i)^{-1} = (1 - i)/2
        let a = qpoly(&[1, 1]);
        let inv = f.inv(&a).expect("non-zero");
        assert_eq!(f.mul(&a, &inv), DensePoly::one());
        assert!(f.inv(&DensePoly::zero()).is_none());
    }

    #[test]
    fn test_pow() {
        let f = gaussian();
        let i = f.generator();
        assert_eq!(f.pow(&i, 4), DensePoly::one());
        assert_eq!(f.pow(&i, 2), qpoly(&[-1]));
    }

    #[test]
    fn test_eval() {
        let f = gaussian();
        // x^2 + 1 evaluated at i is 0.
        assert_eq!(f.eval(&qpoly(&[1, 0, 1]), &f.generator()), DensePoly::zero());
    }

    #[test]
    fn test_apoly_gcd_linear() {
        let f = gaussian();
        let i = f.generator();
        // gcd(y^2 + 1, y - i) = y - i over Q(i).
        let a: APoly = vec![DensePoly::one(), DensePoly::zero(), DensePoly::one()];
        let b: APoly = vec![i.neg(), DensePoly::one()];
        let g = f.poly_gcd(&a, &b);
        assert_eq!(g, b);
    }
}
