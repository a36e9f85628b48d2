//! The flattener: collapsing a tower into one absolute extension of Q.
//!
//! For a step L = B(β) over a base with absolute generator α and absolute
//! polynomial g, the candidate absolute generator is θ = β + k·α for an
//! integer shift k. Its minimal polynomial is found by bivariate
//! elimination: R_k(x) = res_y(f(x − k·y, y), g(y)) with f the defining
//! polynomial of β and α substituted by y. The shift is searched over
//! 0, 1, −1, 2, −2, ... until R_k is squarefree of full degree, which
//! certifies that θ generates the whole compositum.
//!
//! α is then recovered inside Q[x]/(R_k) as the unique root of
//! gcd(g(y), f(θ − k·y, y)), and β = θ − k·α. Towers taller than two are
//! flattened bottom-up; each step flattens against its already-flattened
//! base, which is memoized on the base itself.

use turris_poly::{is_squarefree, make_monic, resultant, DensePoly};
use turris_rings::Q;

use crate::absolute::{APoly, AbsoluteField};
use crate::error::{FieldError, Result};
use crate::tower::NumberField;

/// Largest shift magnitude tried before giving up.
///
/// No bound is proven for the shift search; in practice tiny shifts
/// succeed. Exhaustion is reported, never silent, and
/// [`NumberField::flatten_with_bound`] retries wider.
pub const DEFAULT_SHIFT_BOUND: i64 = 50;

/// The flattening of a tower: one absolute generator θ with its minimal
/// polynomial over Q, and the tower data re-expressed in θ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flattening {
    /// Monic minimal polynomial of θ over Q.
    pub absolute_poly: DensePoly<Q>,
    /// The shift k with θ = β + k·α.
    pub shift: i64,
    /// The base's absolute generator α as a polynomial in θ.
    pub base_generator: DensePoly<Q>,
    /// The top generator β as a polynomial in θ.
    pub top_generator: DensePoly<Q>,
    /// Every tower generator as a polynomial in θ, top-first.
    pub gen_images: Vec<DensePoly<Q>>,
}

impl Flattening {
    /// The trivial flattening of the rationals: Q = Q[x]/(x), θ = 0.
    #[must_use]
    pub fn rationals() -> Self {
        Flattening {
            absolute_poly: DensePoly::x(),
            shift: 0,
            base_generator: DensePoly::zero(),
            top_generator: DensePoly::zero(),
            gen_images: vec![],
        }
    }
}

/// The shift sequence 0, 1, −1, 2, −2, ... up to the bound.
pub(crate) fn shifts(bound: i64) -> impl Iterator<Item = i64> {
    (0..=bound).flat_map(|k| if k == 0 { vec![0] } else { vec![k, -k] })
}

/// Flattens one step against its (already flattened) base.
pub(crate) fn compute_flattening(field: &NumberField, bound: i64) -> Result<Flattening> {
    let base_flat = field.base_field().flattening()?;
    let g = &base_flat.absolute_poly;
    let target = field.relative_degree() * g.degree();

    // Bivariate polynomials: outer variable y (the base generator), inner
    // variable x (the candidate absolute generator).
    type Biv = DensePoly<DensePoly<Q>>;
    let x_inner: Biv = DensePoly::constant(DensePoly::x());
    let y_outer: Biv = DensePoly::x();
    let g_outer: Biv = g.map_coeffs(|c| DensePoly::constant(c.clone()));

    for k in shifts(bound) {
        // t = x − k·y, then f(t, y) by Horner over the coefficients of f,
        // each a polynomial in α read as a polynomial in y.
        let t = x_inner.sub(&y_outer.scale(&DensePoly::constant(Q::from_int(k))));
        let mut shifted: Biv = DensePoly::zero();
        for c in field.relative_polynomial().iter().rev() {
            let cy: Biv = c
                .absolute_rep()
                .map_coeffs(|q| DensePoly::constant(q.clone()));
            shifted = shifted.mul(&t).add(&cy);
        }

        let r = resultant(&shifted, &g_outer);
        if r.degree() != target || !is_squarefree(&r) {
            continue;
        }
        let r = make_monic(&r);

        return recover_generators(&base_flat, &shifted, g, &r, k);
    }

    Err(FieldError::EliminationExhausted { bound })
}

/// Recovers α and β inside Q[x]/(R_k) and assembles the flattening.
fn recover_generators(
    base_flat: &Flattening,
    shifted: &DensePoly<DensePoly<Q>>,
    g: &DensePoly<Q>,
    r: &DensePoly<Q>,
    k: i64,
) -> Result<Flattening> {
    let ctx = AbsoluteField::new(r);
    let theta = ctx.generator();

    // f(θ − k·y, y) over Q[x]/(R_k): substitute x → θ in each coefficient.
    let f_theta: APoly =
        ctx.poly_normalize(shifted.coeffs().iter().map(|cx| ctx.reduce(cx)).collect());
    let g_theta: APoly = ctx.poly_normalize(
        g.coeffs()
            .iter()
            .map(|q| DensePoly::constant(q.clone()))
            .collect(),
    );

    let d = ctx.poly_gcd(&g_theta, &f_theta);
    if ctx.poly_degree(&d) != Some(1) {
        // A non-linear gcd witnesses a reducible defining polynomial.
        return Err(FieldError::NonIrreducibleDefiningPolynomial);
    }
    let alpha = d[0].neg();
    let beta = ctx.sub(&theta, &alpha.scale(&Q::from_int(k)));

    let mut gen_images = vec![beta.clone()];
    for img in &base_flat.gen_images {
        gen_images.push(ctx.eval(img, &alpha));
    }

    Ok(Flattening {
        absolute_poly: r.clone(),
        shift: k,
        base_generator: alpha,
        top_generator: beta,
        gen_images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tower::NumberField;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    #[test]
    fn test_shift_sequence() {
        let s: Vec<i64> = shifts(2).collect();
        assert_eq!(s, vec![0, 1, -1, 2, -2]);
    }

    #[test]
    fn test_absolute_step_is_its_own_flattening() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let flat = k.flattening().unwrap();
        assert_eq!(flat.absolute_poly, qpoly(&[2, 0, 1]));
        assert_eq!(flat.shift, 0);
        assert_eq!(flat.base_generator, DensePoly::zero());
        assert_eq!(flat.top_generator, DensePoly::x());
        assert_eq!(flat.gen_images.len(), 1);
    }

    #[test]
    fn test_two_level_flattening() {
        // Q(sqrt(-2), sqrt(-3)): absolute degree 4.
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        let flat = l.flattening().unwrap();

        assert_eq!(flat.absolute_poly.degree(), 4);
        assert!(is_squarefree(&flat.absolute_poly));
        assert_eq!(flat.gen_images.len(), 2);

        // θ = β + k·α holds inside the absolute field.
        let ctx = AbsoluteField::new(&flat.absolute_poly);
        let rebuilt = ctx.add(
            &flat.top_generator,
            &flat.base_generator.scale(&Q::from_int(flat.shift)),
        );
        assert_eq!(rebuilt, ctx.generator());
    }

    #[test]
    fn test_generator_images_are_roots() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        let flat = l.flattening().unwrap();
        let ctx = AbsoluteField::new(&flat.absolute_poly);

        // α is a root of x^2 + 2, β of x^2 + 3.
        assert!(ctx.eval(&qpoly(&[2, 0, 1]), &flat.base_generator).is_zero());
        assert!(ctx.eval(&qpoly(&[3, 0, 1]), &flat.top_generator).is_zero());
    }

    #[test]
    fn test_three_level_degree_multiplicativity() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        let m = l.extension_rational(&qpoly(&[-5, 1]), "c").unwrap();
        // A degree-1 step on top keeps the absolute degree at 4.
        assert_eq!(m.absolute_degree().unwrap(), 4);

        let m2 = l.extension_rational(&qpoly(&[7, 0, 1]), "c").unwrap();
        assert_eq!(m2.absolute_degree().unwrap(), 8);
    }

    #[test]
    fn test_reducible_over_base_rejected() {
        // x^2 - 2 factors over Q(sqrt(2)): the norm resultant is
        // squarefree for some shift but reducible over Q, and the
        // construction check catches exactly that.
        let k = NumberField::new(&qpoly(&[-2, 0, 1]), "a").unwrap();
        assert_eq!(
            k.extension_rational(&qpoly(&[-2, 0, 1]), "b").unwrap_err(),
            FieldError::NonIrreducibleDefiningPolynomial
        );
    }
}
