//! Squarefree testing and decomposition.
//!
//! A polynomial is squarefree if it has no repeated roots, equivalently if
//! gcd(f, f') is constant. The decomposition writes f = f₁ · f₂² · f₃³ · ...
//! with each fᵢ squarefree and pairwise coprime (Yun's algorithm, valid in
//! characteristic 0).

use turris_rings::traits::Field;

use crate::algorithms::gcd::{make_monic, poly_div_rem, poly_gcd};
use crate::dense::DensePoly;

/// Returns true if the polynomial has no repeated roots.
pub fn is_squarefree<F: Field>(f: &DensePoly<F>) -> bool {
    if f.is_zero() {
        return false;
    }
    if f.degree() <= 1 {
        return true;
    }
    poly_gcd(f, &f.derivative()).degree() == 0
}

/// Returns the monic product of the distinct irreducible factors of f.
pub fn squarefree_part<F: Field>(f: &DensePoly<F>) -> DensePoly<F> {
    if f.is_zero() || f.degree() == 0 {
        return make_monic(f);
    }
    let g = poly_gcd(f, &f.derivative());
    let (part, _) = poly_div_rem(f, &g);
    make_monic(&part)
}

/// Computes the squarefree decomposition f = ∏ fᵢ^i (Yun's algorithm).
///
/// Returns the monic squarefree factors with their multiplicities, omitting
/// trivial (constant) factors. The leading coefficient is discarded.
pub fn squarefree_decomposition<F: Field>(f: &DensePoly<F>) -> Vec<(DensePoly<F>, u32)> {
    let f = make_monic(f);
    if f.degree() == 0 {
        return vec![];
    }

    let df = f.derivative();
    let mut a = poly_gcd(&f, &df);
    let (mut b, _) = poly_div_rem(&f, &a);
    let (mut c, _) = poly_div_rem(&df, &a);

    let mut factors = Vec::new();
    let mut i = 1u32;

    loop {
        let d = c.sub(&b.derivative());
        if d.is_zero() {
            if b.degree() > 0 {
                factors.push((make_monic(&b), i));
            }
            break;
        }

        a = poly_gcd(&b, &d);
        if a.degree() > 0 {
            factors.push((a.clone(), i));
        }

        let (nb, _) = poly_div_rem(&b, &a);
        let (nc, _) = poly_div_rem(&d, &a);
        b = nb;
        c = nc;
        i += 1;

        if b.degree() == 0 {
            break;
        }
    }

    factors
}
