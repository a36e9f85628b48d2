//! Polynomial division and GCD over a field.

use turris_rings::traits::{EuclideanDomain, Field};

use crate::dense::DensePoly;

/// Divides polynomial a by b, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is zero.
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> (DensePoly<F>, DensePoly<F>) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.degree() < b.degree() || a.is_zero() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = b
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a non-zero polynomial over a field is invertible");
    let mut quotient = vec![F::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b.coeffs().len() {
        let deg_diff = remainder.len() - b.coeffs().len();
        let coeff = remainder.last().expect("non-empty").clone() * b_lead_inv.clone();

        quotient[deg_diff] = coeff.clone();

        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[deg_diff + i] = remainder[deg_diff + i].clone() - coeff.clone() * bc.clone();
        }

        while remainder.len() > 1 && remainder.last().map_or(false, turris_rings::Ring::is_zero) {
            remainder.pop();
        }

        if remainder.len() == 1 && remainder[0].is_zero() {
            break;
        }
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Computes the monic GCD of two polynomials over a field.
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    if a.is_zero() {
        return make_monic(b);
    }
    if b.is_zero() {
        return make_monic(a);
    }

    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Extended Euclidean algorithm for polynomials over a field.
///
/// Returns (g, s, t) with g = gcd(a, b) monic and s*a + t*b = g.
pub fn extended_gcd<F: Field>(
    a: &DensePoly<F>,
    b: &DensePoly<F>,
) -> (DensePoly<F>, DensePoly<F>, DensePoly<F>) {
    let mut r0 = a.clone();
    let mut r1 = b.clone();
    let mut s0 = DensePoly::one();
    let mut s1 = DensePoly::zero();
    let mut t0 = DensePoly::zero();
    let mut t1 = DensePoly::one();

    while !r1.is_zero() {
        let (q, r) = poly_div_rem(&r0, &r1);
        let s = s0.sub(&q.mul(&s1));
        let t = t0.sub(&q.mul(&t1));
        r0 = r1;
        r1 = r;
        s0 = s1;
        s1 = s;
        t0 = t1;
        t1 = t;
    }

    // Normalize so the gcd is monic.
    if r0.is_zero() {
        return (r0, s0, t0);
    }
    let lead_inv = r0
        .leading_coeff()
        .inv()
        .expect("non-zero leading coefficient");
    (
        r0.scale(&lead_inv),
        s0.scale(&lead_inv),
        t0.scale(&lead_inv),
    )
}

/// Makes a polynomial monic (leading coefficient = 1).
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    if p.is_zero() {
        return p.clone();
    }

    let lead_inv = p
        .leading_coeff()
        .inv()
        .expect("non-zero leading coefficient");
    p.scale(&lead_inv)
}

/// Computes the content of a polynomial (GCD of all coefficients).
pub fn content<R: EuclideanDomain>(p: &DensePoly<R>) -> R {
    p.coeffs()
        .iter()
        .cloned()
        .reduce(|a, b| a.gcd(&b))
        .unwrap_or_else(R::zero)
}
