//! The coercion graph.
//!
//! An [`Embedding`] is a ring homomorphism fixing Q, represented by the
//! image of the source's absolute generator θ_S in the target. Applying
//! it is evaluation of absolute coordinates at that image; composing two
//! edges is evaluation of one image at the other.
//!
//! Resolution order, first match wins: the field itself and the
//! rationals, then tower inclusion (any ancestor, composed through the
//! flattening's α recovery), then orders through their ambient field,
//! then foreign fields whose absolute polynomial has a root here (found
//! symbolically by Trager's norm factorization). Absence of a coercion
//! is a value, not an error; resolution results, including misses, are
//! cached per source identity.

use std::sync::Arc;

use turris_factor::factor_q;
use turris_poly::{is_squarefree, resultant, squarefree_part, DensePoly};
use turris_rings::Q;

use crate::absolute::{APoly, AbsoluteField};
use crate::error::{FieldError, Result};
use crate::ideal::Order;
use crate::tower::{Base, FieldElement, NumberField};

/// A ring homomorphism between two fields of the tower graph, fixing Q.
#[derive(Clone, Debug)]
pub struct Embedding {
    source: Base,
    target: Base,
    /// Image of the source's absolute generator, in target coordinates.
    gen_image: DensePoly<Q>,
}

impl Embedding {
    pub(crate) fn new(source: Base, target: Base, gen_image: DensePoly<Q>) -> Self {
        Self {
            source,
            target,
            gen_image,
        }
    }

    /// The identity embedding of a field into itself.
    #[must_use]
    pub(crate) fn identity(field: &Base) -> Self {
        let gen_image = match field {
            Base::Rationals => DensePoly::zero(),
            Base::Field(_) => DensePoly::x(),
        };
        Self {
            source: field.clone(),
            target: field.clone(),
            gen_image,
        }
    }

    /// The domain of this embedding.
    #[must_use]
    pub fn source(&self) -> &Base {
        &self.source
    }

    /// The codomain of this embedding.
    #[must_use]
    pub fn target(&self) -> &Base {
        &self.target
    }

    /// Image of the source's absolute generator in the target.
    #[must_use]
    pub fn gen_image(&self) -> &DensePoly<Q> {
        &self.gen_image
    }

    /// Maps an element of the source into the target by evaluating its
    /// absolute coordinates at the generator image.
    ///
    /// Fails with [`FieldError::NoCoercion`] when the element does not
    /// belong to the source field.
    pub fn apply(&self, x: &FieldElement) -> Result<FieldElement> {
        if !x.parent().same(&self.source) {
            return Err(FieldError::NoCoercion);
        }
        let ctx = self.target.absolute_field()?;
        let rep = ctx.eval(x.absolute_rep(), &self.gen_image);
        Ok(FieldElement {
            parent: self.target.clone(),
            rep,
        })
    }

    /// Composes this embedding with a following one: `self` then `next`.
    ///
    /// Fails with [`FieldError::NoCoercion`] when the codomain of `self`
    /// is not the domain of `next`.
    pub fn then(&self, next: &Embedding) -> Result<Embedding> {
        if !self.target.same(&next.source) {
            return Err(FieldError::NoCoercion);
        }
        let ctx = next.target.absolute_field()?;
        Ok(Embedding {
            source: self.source.clone(),
            target: next.target.clone(),
            gen_image: ctx.eval(&self.gen_image, &next.gen_image),
        })
    }
}

/// Foreign data a field can try to absorb into an element.
#[derive(Clone, Debug)]
pub enum Coercible {
    /// A rational number.
    Rational(Q),
    /// An integer.
    Integer(turris_rings::Z),
    /// A rational polynomial in the absolute generator θ.
    Polynomial(DensePoly<Q>),
    /// Absolute coordinates, length the absolute degree.
    AbsoluteVector(Vec<Q>),
    /// An element of this or another field.
    Element(FieldElement),
}

impl NumberField {
    /// Resolves a coercion from `source` into this field, or `None` when
    /// no canonical embedding exists. Results are cached per source; the
    /// cache entry keeps the source alive, so an identity key can never
    /// be reused by a later field.
    #[must_use]
    pub fn coerce_map_from(self: &Arc<Self>, source: &Base) -> Option<Arc<Embedding>> {
        let key = source.id();
        if let Some((_, hit)) = self.coercions.read().get(&key) {
            return hit.clone();
        }

        let resolved = self.resolve_coercion(source).map(Arc::new);
        self.coercions
            .write()
            .entry(key)
            .or_insert_with(|| (source.clone(), resolved.clone()));
        resolved
    }

    /// Coercion from an order: rule 2, through its ambient field.
    #[must_use]
    pub fn coerce_map_from_order(self: &Arc<Self>, order: &Order) -> Option<Arc<Embedding>> {
        self.coerce_map_from(&Base::Field(order.ambient().clone()))
    }

    /// Every embedding of this field into `target`, one per root of
    /// this field's absolute polynomial there, in the order
    /// [`roots_of`](Self::roots_of) produces them. Empty when the
    /// polynomial has no root in `target`.
    pub fn embeddings(self: &Arc<Self>, target: &Arc<NumberField>) -> Result<Vec<Arc<Embedding>>> {
        let p = self.absolute_polynomial()?;
        let roots = target.roots_of(&p)?;
        let source = Base::Field(self.clone());
        let target = Base::Field(target.clone());
        Ok(roots
            .into_iter()
            .map(|image| Arc::new(Embedding::new(source.clone(), target.clone(), image)))
            .collect())
    }

    /// The automorphisms of this field, as its embeddings into itself.
    /// The count equals the absolute degree exactly when the field is
    /// Galois over the rationals.
    pub fn automorphisms(self: &Arc<Self>) -> Result<Vec<Arc<Embedding>>> {
        self.embeddings(self)
    }

    fn resolve_coercion(self: &Arc<Self>, source: &Base) -> Option<Embedding> {
        let here = Base::Field(self.clone());
        if source.same(&here) {
            return Some(Embedding::identity(&here));
        }
        if matches!(source, Base::Rationals) {
            return Some(Embedding::new(
                Base::Rationals,
                here,
                DensePoly::zero(),
            ));
        }

        if let Some(image) = self.ancestor_image(source) {
            return Some(Embedding::new(source.clone(), here, image));
        }

        // Foreign field: embed iff its absolute polynomial has a root
        // here. The first root in the deterministic factor order wins.
        let Base::Field(foreign) = source else {
            return None;
        };
        let p = foreign.absolute_polynomial().ok()?;
        let roots = self.roots_of(&p).ok()?;
        let image = roots.into_iter().next()?;
        Some(Embedding::new(source.clone(), here, image))
    }

    /// Image of an ancestor's absolute generator, composed through the
    /// tower: the immediate base maps by α(θ), deeper ancestors by first
    /// mapping into the base.
    fn ancestor_image(self: &Arc<Self>, source: &Base) -> Option<DensePoly<Q>> {
        let flat = self.flattening().ok()?;
        let base = self.base_field();
        if source.same(base) {
            return Some(flat.base_generator.clone());
        }

        let Base::Field(b) = base else {
            return None;
        };
        let into_base = b.coerce_map_from(source)?;
        let ctx = self.absolute_context().ok()?;
        Some(ctx.eval(into_base.gen_image(), &flat.base_generator))
    }

    /// Builds an element of this field from foreign data, failing with
    /// [`FieldError::NoCoercion`] when no embedding exists.
    pub fn element_from(self: &Arc<Self>, value: Coercible) -> Result<FieldElement> {
        match value {
            Coercible::Rational(q) => Ok(self.from_rational(q)),
            Coercible::Integer(n) => Ok(self.from_rational(Q::from_integer(n))),
            Coercible::Polynomial(p) => {
                let ctx = self.absolute_context()?;
                Ok(self.element_from_rep(ctx.reduce(&p)))
            }
            Coercible::AbsoluteVector(v) => self.from_absolute_vector(&v),
            Coercible::Element(x) => {
                let emb = self
                    .coerce_map_from(x.parent())
                    .ok_or(FieldError::NoCoercion)?;
                emb.apply(&x)
            }
        }
    }

    /// All roots of a rational polynomial in this field, in the
    /// deterministic order of the norm factorization.
    ///
    /// Trager's method: for a shift s making the norm
    /// N_s(x) = res_y(p(x − s·y), R(y)) squarefree, the roots of p here
    /// correspond to the full-degree irreducible factors N_i of N_s, each
    /// recovered as the unique root of gcd(p(y), N_i(y + s·θ)).
    pub fn roots_of(self: &Arc<Self>, p: &DensePoly<Q>) -> Result<Vec<DensePoly<Q>>> {
        let p = squarefree_part(p);
        if p.degree() == 0 {
            return Ok(vec![]);
        }

        let flat = self.flattening()?;
        let r = &flat.absolute_poly;
        let n = r.degree();
        let ctx = AbsoluteField::new(r);
        let theta = ctx.generator();

        type Biv = DensePoly<DensePoly<Q>>;
        let x_inner: Biv = DensePoly::constant(DensePoly::x());
        let y_outer: Biv = DensePoly::x();
        let r_outer: Biv = r.map_coeffs(|c| DensePoly::constant(c.clone()));

        for s in crate::flatten::shifts(crate::flatten::DEFAULT_SHIFT_BOUND) {
            let t = x_inner.sub(&y_outer.scale(&DensePoly::constant(Q::from_int(s))));
            let mut shifted: Biv = DensePoly::zero();
            for c in p.coeffs().iter().rev() {
                shifted = shifted
                    .mul(&t)
                    .add(&DensePoly::constant(DensePoly::constant(c.clone())));
            }

            let norm = resultant(&shifted, &r_outer);
            if norm.degree() != p.degree() * n || !is_squarefree(&norm) {
                continue;
            }

            let p_over: APoly = ctx.poly_normalize(
                p.coeffs()
                    .iter()
                    .map(|q| DensePoly::constant(q.clone()))
                    .collect(),
            );
            let shift_point = theta.scale(&Q::from_int(s));

            let mut roots = Vec::new();
            for (factor, _) in factor_q(&norm).factors {
                if factor.degree() != n {
                    continue;
                }
                // N_i(y + s·θ) as a polynomial over the field.
                let mut lifted: APoly = vec![];
                for c in factor.coeffs().iter().rev() {
                    lifted = apoly_mul_linear(&ctx, &lifted, &shift_point);
                    lifted = apoly_add_const(&ctx, lifted, &DensePoly::constant(c.clone()));
                }
                let d = ctx.poly_gcd(&p_over, &lifted);
                if ctx.poly_degree(&d) == Some(1) {
                    roots.push(d[0].neg());
                }
            }
            return Ok(roots);
        }

        Err(FieldError::EliminationExhausted {
            bound: crate::flatten::DEFAULT_SHIFT_BOUND,
        })
    }
}

/// Multiplies a polynomial over the field by (y + c).
fn apoly_mul_linear(ctx: &AbsoluteField, f: &APoly, c: &DensePoly<Q>) -> APoly {
    if f.is_empty() {
        return vec![];
    }
    let mut out = vec![DensePoly::zero(); f.len() + 1];
    for (i, coeff) in f.iter().enumerate() {
        out[i + 1] = out[i + 1].add(coeff);
        out[i] = out[i].add(&ctx.mul(coeff, c));
    }
    ctx.poly_normalize(out)
}

/// Adds a field constant to a polynomial over the field.
fn apoly_add_const(ctx: &AbsoluteField, mut f: APoly, c: &DensePoly<Q>) -> APoly {
    if f.is_empty() {
        f.push(c.clone());
    } else {
        f[0] = f[0].add(c);
    }
    ctx.poly_normalize(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use turris_rings::Z;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    fn tower() -> (Arc<NumberField>, Arc<NumberField>) {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        (k, l)
    }

    #[test]
    fn test_rational_coercion() {
        let (k, _) = tower();
        let emb = k.coerce_map_from(&Base::Rationals).expect("Q embeds");
        let x = emb
            .apply(&Base::Rationals.from_rational(Q::from_i64(2, 3)))
            .unwrap();
        assert_eq!(x.to_rational(), Some(Q::from_i64(2, 3)));
    }

    #[test]
    fn test_base_inclusion() {
        let (k, l) = tower();
        let emb = l
            .coerce_map_from(&Base::Field(k.clone()))
            .expect("base embeds");
        let alpha = k.gen().unwrap();
        let up = emb.apply(&alpha).unwrap();

        // The image still squares to −2.
        assert_eq!(up.mul(&up).unwrap().to_rational(), Some(Q::from_int(-2)));
    }

    #[test]
    fn test_grandparent_inclusion_composes() {
        let (k, l) = tower();
        let m = l.extension_rational(&qpoly(&[7, 0, 1]), "c").unwrap();

        let direct = m
            .coerce_map_from(&Base::Field(k.clone()))
            .expect("grandparent embeds");
        let lower = l.coerce_map_from(&Base::Field(k.clone())).unwrap();
        let upper = m.coerce_map_from(&Base::Field(l.clone())).unwrap();
        let composed = lower.then(&upper).unwrap();

        let alpha = k.gen().unwrap();
        assert_eq!(
            direct.apply(&alpha).unwrap(),
            composed.apply(&alpha).unwrap()
        );
    }

    #[test]
    fn test_no_coercion_is_a_value() {
        let (k, _) = tower();
        let other = NumberField::new(&qpoly(&[5, 0, 1]), "z").unwrap();
        assert!(k.coerce_map_from(&Base::Field(other)).is_none());
        // The miss is cached and stays a miss.
        let other2 = NumberField::new(&qpoly(&[5, 0, 1]), "z").unwrap();
        assert!(k.coerce_map_from(&Base::Field(other2)).is_none());
    }

    #[test]
    fn test_automorphisms_of_a_quadratic_field() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let auts = k.automorphisms().unwrap();
        assert_eq!(auts.len(), 2);

        // The generator goes to a root of its own polynomial, so the
        // two maps fix it and negate it.
        let a = k.gen().unwrap();
        let images: Vec<_> = auts.iter().map(|e| e.apply(&a).unwrap()).collect();
        assert!(images.contains(&a));
        assert!(images.contains(&a.neg()));
    }

    #[test]
    fn test_embedding_counts_across_the_tower() {
        let (k, l) = tower();
        // Q(sqrt(-2), sqrt(-3)) is Galois of degree 4 over Q.
        assert_eq!(l.automorphisms().unwrap().len(), 4);
        // The quadratic field embeds into the tower two ways.
        assert_eq!(k.embeddings(&l).unwrap().len(), 2);
        // And not at all into an incompatible field.
        let m = NumberField::new(&qpoly(&[-7, 0, 1]), "r").unwrap();
        assert!(k.embeddings(&m).unwrap().is_empty());
    }

    #[test]
    fn test_cached_miss_retains_its_source() {
        let (_k, l) = tower();
        let stale_id = {
            let doomed = NumberField::new(&qpoly(&[-7, 0, 1]), "r").unwrap();
            let base = Base::Field(doomed);
            assert!(l.coerce_map_from(&base).is_none());
            base.id()
        };

        // The cached miss keeps the dropped field alive, so no later
        // field can land on its identity and inherit the miss.
        for _ in 0..64 {
            let fresh = NumberField::new(&qpoly(&[3, 0, 1]), "w").unwrap();
            let base = Base::Field(fresh);
            assert_ne!(base.id(), stale_id);
            assert!(l.coerce_map_from(&base).is_some());
        }
    }

    #[test]
    fn test_foreign_field_root_matching() {
        // Q(sqrt(-3)) is not an ancestor of the tower, but y^2 + 3 has a
        // root there: the top generator.
        let (_, l) = tower();
        let foreign = NumberField::new(&qpoly(&[3, 0, 1]), "w").unwrap();
        let emb = l
            .coerce_map_from(&Base::Field(foreign.clone()))
            .expect("root exists");

        let w = foreign.gen().unwrap();
        let image = emb.apply(&w).unwrap();
        assert_eq!(image.mul(&image).unwrap().to_rational(), Some(Q::from_int(-3)));
    }

    #[test]
    fn test_roots_of() {
        let (_, l) = tower();
        // y^2 + 3 has the two roots ±β in the tower.
        let roots = l.roots_of(&qpoly(&[3, 0, 1])).unwrap();
        assert_eq!(roots.len(), 2);
        let flat = l.flattening().unwrap();
        assert!(roots.contains(&flat.top_generator));
        assert!(roots.contains(&flat.top_generator.neg()));

        // y^2 - 7 has none.
        assert!(l.roots_of(&qpoly(&[-7, 0, 1])).unwrap().is_empty());
    }

    #[test]
    fn test_element_from_variants() {
        let (_, l) = tower();
        assert_eq!(
            l.element_from(Coercible::Integer(Z::new(4))).unwrap().to_rational(),
            Some(Q::from_int(4))
        );

        let theta = l.absolute_generator().unwrap();
        let via_poly = l.element_from(Coercible::Polynomial(DensePoly::x())).unwrap();
        assert_eq!(via_poly, theta);

        let other = NumberField::new(&qpoly(&[5, 0, 1]), "z").unwrap();
        let err = l
            .element_from(Coercible::Element(other.gen().unwrap()))
            .unwrap_err();
        assert_eq!(err, FieldError::NoCoercion);
    }
}
