//! Resultants and discriminants via the Sylvester matrix.
//!
//! The resultant of two polynomials is zero iff they share a common root.
//! The determinant is computed with the Bareiss fraction-free elimination,
//! which stays inside the coefficient domain: only exact divisions occur.
//! Because the entry domain is any `EuclideanDomain`, the same code computes
//! resultants with respect to one variable of bivariate polynomials by
//! taking the entries in `Q[x]`.

use turris_rings::traits::{EuclideanDomain, Field, Ring};

use crate::dense::DensePoly;

/// Computes the resultant of two univariate polynomials.
pub fn resultant<R: EuclideanDomain>(f: &DensePoly<R>, g: &DensePoly<R>) -> R {
    if f.is_zero() || g.is_zero() {
        return R::zero();
    }

    let deg_f = f.degree();
    let deg_g = g.degree();

    if deg_f == 0 {
        return f.leading_coeff().pow(deg_g as u32);
    }

    if deg_g == 0 {
        return g.leading_coeff().pow(deg_f as u32);
    }

    let mut sylvester = build_sylvester_matrix(f, g);
    determinant(&mut sylvester)
}

/// Computes the discriminant of a polynomial over a field.
///
/// disc(f) = (-1)^(n(n-1)/2) * res(f, f') / lc(f), where n = deg(f).
///
/// # Panics
///
/// Panics if `f` is constant.
pub fn discriminant<F: Field>(f: &DensePoly<F>) -> F {
    let n = f.degree();
    assert!(n >= 1, "discriminant requires degree >= 1");

    let res = resultant(f, &f.derivative());
    let lead_inv = f
        .leading_coeff()
        .inv()
        .expect("non-zero leading coefficient");
    let signed = if (n * (n - 1) / 2) % 2 == 1 { -res } else { res };
    signed * lead_inv
}

/// Builds the Sylvester matrix of f and g.
fn build_sylvester_matrix<R: Ring>(f: &DensePoly<R>, g: &DensePoly<R>) -> Vec<Vec<R>> {
    let deg_f = f.degree();
    let deg_g = g.degree();
    let size = deg_f + deg_g;

    let mut matrix = vec![vec![R::zero(); size]; size];

    // First deg_g rows: shifts of f, highest coefficient first.
    for i in 0..deg_g {
        for (j, coeff) in f.coeffs().iter().rev().enumerate() {
            matrix[i][i + j] = coeff.clone();
        }
    }

    // Next deg_f rows: shifts of g.
    for i in 0..deg_f {
        for (j, coeff) in g.coeffs().iter().rev().enumerate() {
            matrix[deg_g + i][i + j] = coeff.clone();
        }
    }

    matrix
}

/// Computes the determinant by Bareiss fraction-free Gaussian elimination.
///
/// All divisions are exact in the entry domain, so the result is exact for
/// any Euclidean domain (integers, rationals, polynomial rings over them).
fn determinant<R: EuclideanDomain>(m: &mut [Vec<R>]) -> R {
    let n = m.len();
    if n == 0 {
        return R::one();
    }

    let mut sign_flip = false;
    let mut prev_pivot = R::one();

    for k in 0..n - 1 {
        if m[k][k].is_zero() {
            match (k + 1..n).find(|&i| !m[i][k].is_zero()) {
                Some(i) => {
                    m.swap(k, i);
                    sign_flip = !sign_flip;
                }
                None => return R::zero(),
            }
        }

        for i in k + 1..n {
            for j in k + 1..n {
                let num =
                    m[i][j].clone() * m[k][k].clone() - m[i][k].clone() * m[k][j].clone();
                m[i][j] = num.div(&prev_pivot);
            }
            m[i][k] = R::zero();
        }

        prev_pivot = m[k][k].clone();
    }

    let det = m[n - 1][n - 1].clone();
    if sign_flip {
        -det
    } else {
        det
    }
}
