//! The field tower model.
//!
//! A tower is a chain of extension steps bottoming out at the rationals.
//! Each [`NumberField`] owns its base (shared through an `Arc`), its
//! generator name and its defining polynomial with coefficients in the
//! base. Field identity is `Arc` pointer identity; the mathematical
//! content of a field never changes after construction, so every derived
//! quantity (flattening, change of basis, coercion edges) is memoized
//! behind a lock and never invalidated.
//!
//! Elements are stored in absolute coordinates: a [`FieldElement`] is a
//! rational polynomial in its parent's absolute generator θ. The relative
//! view (coefficients in the base, powers of the top generator) is always
//! derived through the change-of-basis layer in `vector_space`.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use turris_factor::is_irreducible_q;
use turris_poly::DensePoly;
use turris_rings::{Ring, Q, Z};

use crate::absolute::AbsoluteField;
use crate::coerce::Embedding;
use crate::error::{FieldError, Result};
use crate::flatten::{compute_flattening, Flattening, DEFAULT_SHIFT_BOUND};
use crate::vector_space::RelativeBasis;

/// The base of an extension step: the rationals, or a previously built
/// field shared through an `Arc`.
#[derive(Clone)]
pub enum Base {
    /// The field of rational numbers, the root of every tower.
    Rationals,
    /// A number field lower in the tower.
    Field(Arc<NumberField>),
}

impl Base {
    /// An identity token; two bases are the same field exactly when
    /// their tokens agree.
    #[must_use]
    pub fn id(&self) -> usize {
        match self {
            Base::Rationals => 0,
            Base::Field(f) => Arc::as_ptr(f) as usize,
        }
    }

    /// Returns true if both handles denote the same field instance.
    #[must_use]
    pub fn same(&self, other: &Base) -> bool {
        self.id() == other.id()
    }

    /// Number of extension steps above the rationals.
    #[must_use]
    pub fn tower_height(&self) -> usize {
        match self {
            Base::Rationals => 0,
            Base::Field(f) => f.tower_height(),
        }
    }

    /// The flattening of this base. For the rationals this is the trivial
    /// flattening with absolute polynomial x and generator 0.
    pub fn flattening(&self) -> Result<Arc<Flattening>> {
        match self {
            Base::Rationals => Ok(Arc::new(Flattening::rationals())),
            Base::Field(f) => f.flattening(),
        }
    }

    /// The absolute defining polynomial: x for the rationals.
    pub fn absolute_polynomial(&self) -> Result<DensePoly<Q>> {
        Ok(self.flattening()?.absolute_poly.clone())
    }

    /// The degree over Q: 1 for the rationals.
    pub fn absolute_degree(&self) -> Result<usize> {
        Ok(self.absolute_polynomial()?.degree())
    }

    /// The residue arithmetic context of this base.
    pub fn absolute_field(&self) -> Result<AbsoluteField> {
        Ok(AbsoluteField::new(&self.absolute_polynomial()?))
    }

    /// The zero element of this field.
    #[must_use]
    pub fn zero(&self) -> FieldElement {
        FieldElement {
            parent: self.clone(),
            rep: DensePoly::zero(),
        }
    }

    /// The unit element of this field.
    #[must_use]
    pub fn one(&self) -> FieldElement {
        FieldElement {
            parent: self.clone(),
            rep: DensePoly::one(),
        }
    }

    /// The image of a rational number in this field.
    #[must_use]
    pub fn from_rational(&self, q: Q) -> FieldElement {
        FieldElement {
            parent: self.clone(),
            rep: DensePoly::constant(q),
        }
    }

    /// The image of an integer in this field.
    #[must_use]
    pub fn from_integer(&self, n: Z) -> FieldElement {
        self.from_rational(Q::from_integer(n))
    }

    /// Resolves a coercion into this base. The rationals accept only
    /// themselves.
    #[must_use]
    pub fn coerce_map_from(&self, source: &Base) -> Option<Arc<Embedding>> {
        match self {
            Base::Rationals => {
                if matches!(source, Base::Rationals) {
                    Some(Arc::new(Embedding::identity(self)))
                } else {
                    None
                }
            }
            Base::Field(f) => f.coerce_map_from(source),
        }
    }

    /// Names of every generator in this tower, top-first.
    #[must_use]
    pub fn ancestor_names(&self) -> Vec<String> {
        match self {
            Base::Rationals => vec![],
            Base::Field(f) => {
                let mut names = vec![f.name.clone()];
                names.extend(f.base.ancestor_names());
                names
            }
        }
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Rationals => write!(out, "Q"),
            Base::Field(f) => write!(out, "{f:?}"),
        }
    }
}

/// One extension step of a tower of number fields.
pub struct NumberField {
    base: Base,
    name: String,
    /// Monic defining polynomial, ascending coefficients in the base.
    rel_poly: Vec<FieldElement>,
    pub(crate) flattening: RwLock<Option<Result<Arc<Flattening>>>>,
    pub(crate) relative_basis: RwLock<Option<Result<Arc<RelativeBasis>>>>,
    pub(crate) coercions: RwLock<FxHashMap<usize, (Base, Option<Arc<Embedding>>)>>,
}

impl NumberField {
    /// Builds an extension of the rationals defined by `poly`.
    ///
    /// Fails with [`FieldError::NonIrreducibleDefiningPolynomial`] when
    /// `poly` factors over Q.
    pub fn new(poly: &DensePoly<Q>, name: &str) -> Result<Arc<Self>> {
        let coeffs: Vec<FieldElement> = poly
            .coeffs()
            .iter()
            .map(|c| Base::Rationals.from_rational(c.clone()))
            .collect();
        Self::construct(Base::Rationals, coeffs, name, true)
    }

    /// Builds an extension of the rationals without the irreducibility
    /// check. Name and degree checks still apply.
    ///
    /// The caller asserts irreducibility; on a reducible polynomial the
    /// derived computations report
    /// [`FieldError::NonIrreducibleDefiningPolynomial`] late or produce
    /// ring (not field) arithmetic.
    pub fn new_unchecked(poly: &DensePoly<Q>, name: &str) -> Result<Arc<Self>> {
        let coeffs: Vec<FieldElement> = poly
            .coeffs()
            .iter()
            .map(|c| Base::Rationals.from_rational(c.clone()))
            .collect();
        Self::construct(Base::Rationals, coeffs, name, false)
    }

    /// Builds an extension of this field defined by a polynomial with
    /// coefficients in it, ascending order.
    pub fn extension(
        self: &Arc<Self>,
        coeffs: &[FieldElement],
        name: &str,
    ) -> Result<Arc<Self>> {
        Self::construct(Base::Field(self.clone()), coeffs.to_vec(), name, true)
    }

    /// Builds an extension of this field from a polynomial with rational
    /// coefficients, coercing them in.
    pub fn extension_rational(
        self: &Arc<Self>,
        poly: &DensePoly<Q>,
        name: &str,
    ) -> Result<Arc<Self>> {
        let coeffs: Vec<FieldElement> = poly
            .coeffs()
            .iter()
            .map(|c| Base::Field(self.clone()).from_rational(c.clone()))
            .collect();
        Self::construct(Base::Field(self.clone()), coeffs, name, true)
    }

    /// [`NumberField::extension`] without the irreducibility check.
    pub fn extension_unchecked(
        self: &Arc<Self>,
        coeffs: &[FieldElement],
        name: &str,
    ) -> Result<Arc<Self>> {
        Self::construct(Base::Field(self.clone()), coeffs.to_vec(), name, false)
    }

    fn construct(
        base: Base,
        mut coeffs: Vec<FieldElement>,
        name: &str,
        check_irreducible: bool,
    ) -> Result<Arc<Self>> {
        if base.ancestor_names().iter().any(|n| n == name) {
            return Err(FieldError::NameCollision(name.to_string()));
        }

        // Pull every coefficient into the base field.
        for c in &mut coeffs {
            if c.parent.same(&base) {
                continue;
            }
            let emb = base
                .coerce_map_from(&c.parent)
                .ok_or(FieldError::DomainMismatch)?;
            *c = emb.apply(c)?;
        }

        while coeffs.last().is_some_and(|c| c.rep.is_zero()) {
            coeffs.pop();
        }
        if coeffs.len() < 2 {
            // Degree zero cannot define an extension.
            return Err(FieldError::NonIrreducibleDefiningPolynomial);
        }

        // Normalize to monic by dividing through the leading coefficient.
        let lead = coeffs.last().expect("non-empty").clone();
        if !lead.rep.is_one() {
            let ctx = base.absolute_field()?;
            let lead_inv = ctx
                .inv(&lead.rep)
                .ok_or(FieldError::NonIrreducibleDefiningPolynomial)?;
            for c in &mut coeffs {
                c.rep = ctx.mul(&c.rep, &lead_inv);
            }
        }

        let field = Arc::new(NumberField {
            base,
            name: name.to_string(),
            rel_poly: coeffs,
            flattening: RwLock::new(None),
            relative_basis: RwLock::new(None),
            coercions: RwLock::new(FxHashMap::default()),
        });

        if check_irreducible {
            let flat = compute_flattening(&field, DEFAULT_SHIFT_BOUND).map(Arc::new)?;
            if !is_irreducible_q(&flat.absolute_poly) {
                return Err(FieldError::NonIrreducibleDefiningPolynomial);
            }
            *field.flattening.write() = Some(Ok(flat));
        }

        Ok(field)
    }

    /// The generator name of this step.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immediate base of this step.
    #[must_use]
    pub fn base_field(&self) -> &Base {
        &self.base
    }

    /// Returns true when the immediate base is the rationals.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self.base, Base::Rationals)
    }

    /// Number of extension steps above the rationals.
    #[must_use]
    pub fn tower_height(&self) -> usize {
        1 + self.base.tower_height()
    }

    /// The degree of this step over its immediate base.
    #[must_use]
    pub fn relative_degree(&self) -> usize {
        self.rel_poly.len() - 1
    }

    /// The degree of the full tower over Q, triggering flattening on
    /// first access.
    pub fn absolute_degree(&self) -> Result<usize> {
        Ok(self.flattening()?.absolute_poly.degree())
    }

    /// The monic defining polynomial over the immediate base, ascending
    /// coefficients.
    #[must_use]
    pub fn relative_polynomial(&self) -> &[FieldElement] {
        &self.rel_poly
    }

    /// The minimal polynomial of the absolute generator θ over Q.
    pub fn absolute_polynomial(&self) -> Result<DensePoly<Q>> {
        Ok(self.flattening()?.absolute_poly.clone())
    }

    /// Always fails: a relative field has two degrees, not one.
    pub fn degree(&self) -> Result<usize> {
        Err(FieldError::AmbiguousQuantity("degree"))
    }

    /// Always fails: pick [`NumberField::relative_polynomial`] or
    /// [`NumberField::absolute_polynomial`].
    pub fn polynomial(&self) -> Result<DensePoly<Q>> {
        Err(FieldError::AmbiguousQuantity("polynomial"))
    }

    /// Always fails: pick the relative or the absolute vector space.
    pub fn vector_space(&self) -> Result<usize> {
        Err(FieldError::AmbiguousQuantity("vector_space"))
    }

    /// The flattening of this tower, memoized (failures included).
    pub fn flattening(&self) -> Result<Arc<Flattening>> {
        if let Some(cached) = self.flattening.read().clone() {
            return cached;
        }

        let mut slot = self.flattening.write();
        if let Some(cached) = slot.clone() {
            return cached;
        }
        let computed = compute_flattening(self, DEFAULT_SHIFT_BOUND).map(Arc::new);
        *slot = Some(computed.clone());
        computed
    }

    /// Retries a failed flattening with a wider shift search window,
    /// replacing a cached failure on success.
    pub fn flatten_with_bound(&self, bound: i64) -> Result<Arc<Flattening>> {
        if let Some(Ok(cached)) = self.flattening.read().clone() {
            return Ok(cached);
        }

        let mut slot = self.flattening.write();
        if let Some(Ok(cached)) = slot.clone() {
            return Ok(cached);
        }
        let computed = compute_flattening(self, bound).map(Arc::new);
        *slot = Some(computed.clone());
        computed
    }

    /// The residue arithmetic context Q[x]/(absolute polynomial).
    pub fn absolute_context(&self) -> Result<AbsoluteField> {
        Ok(AbsoluteField::new(&self.absolute_polynomial()?))
    }

    /// The top generator β of this step, as an element of this field.
    pub fn gen(self: &Arc<Self>) -> Result<FieldElement> {
        let flat = self.flattening()?;
        Ok(self.element_from_rep(flat.top_generator.clone()))
    }

    /// All tower generator images in this field, top-first.
    pub fn gens(self: &Arc<Self>) -> Result<Vec<FieldElement>> {
        let flat = self.flattening()?;
        Ok(flat
            .gen_images
            .iter()
            .map(|rep| self.element_from_rep(rep.clone()))
            .collect())
    }

    /// Number of generators, equal to the tower height.
    #[must_use]
    pub fn ngens(&self) -> usize {
        self.tower_height()
    }

    /// The absolute generator θ of the flattened tower.
    pub fn absolute_generator(self: &Arc<Self>) -> Result<FieldElement> {
        let ctx = self.absolute_context()?;
        Ok(self.element_from_rep(ctx.generator()))
    }

    /// The zero element.
    #[must_use]
    pub fn zero(self: &Arc<Self>) -> FieldElement {
        Base::Field(self.clone()).zero()
    }

    /// The unit element.
    #[must_use]
    pub fn one(self: &Arc<Self>) -> FieldElement {
        Base::Field(self.clone()).one()
    }

    /// The image of a rational number in this field.
    #[must_use]
    pub fn from_rational(self: &Arc<Self>, q: Q) -> FieldElement {
        Base::Field(self.clone()).from_rational(q)
    }

    /// Wraps reduced absolute coordinates as an element of this field.
    pub(crate) fn element_from_rep(self: &Arc<Self>, rep: DensePoly<Q>) -> FieldElement {
        FieldElement {
            parent: Base::Field(self.clone()),
            rep,
        }
    }

    /// The flattened tower as a standalone absolute field, together with
    /// the mutually inverse structure isomorphisms (self into the new
    /// field, and back).
    pub fn absolute_field(
        self: &Arc<Self>,
        name: &str,
    ) -> Result<(Arc<NumberField>, Arc<Embedding>, Arc<Embedding>)> {
        let flat = self.flattening()?;
        let abs = NumberField::new(&flat.absolute_poly, name)?;

        let here = Base::Field(self.clone());
        let there = Base::Field(abs.clone());
        // Both fields share the defining polynomial, so θ maps to θ.
        let x = DensePoly::x();
        let to = Arc::new(Embedding::new(here.clone(), there.clone(), x.clone()));
        let from = Arc::new(Embedding::new(there, here, x));
        Ok((abs, to, from))
    }

    /// The flattened base as a standalone absolute field with structure
    /// maps; the rationals flatten to the degree-one field Q[x]/(x).
    pub fn absolute_base_field(
        &self,
        name: &str,
    ) -> Result<(Arc<NumberField>, Arc<Embedding>, Arc<Embedding>)> {
        match &self.base {
            Base::Field(b) => b.absolute_field(name),
            Base::Rationals => {
                let abs = NumberField::new(&DensePoly::x(), name)?;
                let there = Base::Field(abs.clone());
                let zero = DensePoly::zero();
                let to = Arc::new(Embedding::new(Base::Rationals, there.clone(), zero.clone()));
                let from = Arc::new(Embedding::new(there, Base::Rationals, zero));
                Ok((abs, to, from))
            }
        }
    }
}

impl fmt::Debug for NumberField {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            out,
            "NumberField({}, relative degree {}, over {:?})",
            self.name,
            self.relative_degree(),
            self.base
        )
    }
}

impl fmt::Display for NumberField {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Base::Rationals => write!(
                out,
                "Number field in {} of degree {} over Q",
                self.name,
                self.relative_degree()
            ),
            Base::Field(b) => write!(
                out,
                "Number field in {} of relative degree {} over {}",
                self.name,
                self.relative_degree(),
                b
            ),
        }
    }
}

/// An element of a number field (or of the rationals), stored as a
/// rational polynomial in the parent's absolute generator θ.
#[derive(Clone)]
pub struct FieldElement {
    pub(crate) parent: Base,
    pub(crate) rep: DensePoly<Q>,
}

impl FieldElement {
    /// The field this element lives in.
    #[must_use]
    pub fn parent(&self) -> &Base {
        &self.parent
    }

    /// Absolute coordinates: the reduced polynomial in θ.
    #[must_use]
    pub fn absolute_rep(&self) -> &DensePoly<Q> {
        &self.rep
    }

    /// Returns true for the zero element.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rep.is_zero()
    }

    /// Returns true for the unit element.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.rep.is_one()
    }

    /// Brings both operands into a common parent, coercing one into the
    /// other's field when the two differ.
    fn unify(&self, other: &FieldElement) -> Result<(Base, DensePoly<Q>, DensePoly<Q>)> {
        if self.parent.same(&other.parent) {
            return Ok((self.parent.clone(), self.rep.clone(), other.rep.clone()));
        }

        if let Some(emb) = self.parent.coerce_map_from(&other.parent) {
            let mapped = emb.apply(other)?;
            return Ok((self.parent.clone(), self.rep.clone(), mapped.rep));
        }
        if let Some(emb) = other.parent.coerce_map_from(&self.parent) {
            let mapped = emb.apply(self)?;
            return Ok((other.parent.clone(), mapped.rep, other.rep.clone()));
        }

        Err(FieldError::NoCoercion)
    }

    /// Adds two elements, coercing across related fields.
    pub fn add(&self, other: &FieldElement) -> Result<FieldElement> {
        let (parent, a, b) = self.unify(other)?;
        Ok(FieldElement {
            parent,
            rep: a.add(&b),
        })
    }

    /// Subtracts two elements, coercing across related fields.
    pub fn sub(&self, other: &FieldElement) -> Result<FieldElement> {
        let (parent, a, b) = self.unify(other)?;
        Ok(FieldElement {
            parent,
            rep: a.sub(&b),
        })
    }

    /// Multiplies two elements, coercing across related fields.
    pub fn mul(&self, other: &FieldElement) -> Result<FieldElement> {
        let (parent, a, b) = self.unify(other)?;
        let ctx = parent.absolute_field()?;
        Ok(FieldElement {
            parent,
            rep: ctx.mul(&a, &b),
        })
    }

    /// Divides two elements, coercing across related fields.
    ///
    /// # Errors
    ///
    /// Fails with [`FieldError::DivisionByZero`] when `other` is zero.
    pub fn div(&self, other: &FieldElement) -> Result<FieldElement> {
        let (parent, a, b) = self.unify(other)?;
        let ctx = parent.absolute_field()?;
        let rep = ctx.div(&a, &b).ok_or(FieldError::DivisionByZero)?;
        Ok(FieldElement { parent, rep })
    }

    /// The additive inverse.
    #[must_use]
    pub fn neg(&self) -> FieldElement {
        FieldElement {
            parent: self.parent.clone(),
            rep: self.rep.neg(),
        }
    }

    /// The multiplicative inverse, or `None` for zero.
    pub fn inverse(&self) -> Result<Option<FieldElement>> {
        let ctx = self.parent.absolute_field()?;
        Ok(ctx.inv(&self.rep).map(|rep| FieldElement {
            parent: self.parent.clone(),
            rep,
        }))
    }

    /// Raises an element to a non-negative power.
    pub fn pow(&self, n: u32) -> Result<FieldElement> {
        let ctx = self.parent.absolute_field()?;
        Ok(FieldElement {
            parent: self.parent.clone(),
            rep: ctx.pow(&self.rep, n),
        })
    }

    /// The rational value of this element, if it is rational.
    #[must_use]
    pub fn to_rational(&self) -> Option<Q> {
        if self.rep.is_constant() {
            Some(self.rep.coeff(0))
        } else {
            None
        }
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.parent.same(&other.parent) && self.rep == other.rep
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(out, "{:?} in {:?}", self.rep, self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    #[test]
    fn test_reducible_rejected() {
        let err = NumberField::new(&qpoly(&[-4, 0, 1]), "a").unwrap_err();
        assert_eq!(err, FieldError::NonIrreducibleDefiningPolynomial);
    }

    #[test]
    fn test_constant_rejected() {
        let err = NumberField::new(&qpoly(&[3]), "a").unwrap_err();
        assert_eq!(err, FieldError::NonIrreducibleDefiningPolynomial);
    }

    #[test]
    fn test_name_collision() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let err = k.extension_rational(&qpoly(&[3, 0, 1]), "a").unwrap_err();
        assert_eq!(err, FieldError::NameCollision("a".to_string()));
    }

    #[test]
    fn test_ambiguous_queries() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        assert_eq!(
            l.degree().unwrap_err(),
            FieldError::AmbiguousQuantity("degree")
        );
        assert_eq!(
            l.polynomial().unwrap_err(),
            FieldError::AmbiguousQuantity("polynomial")
        );
        assert_eq!(
            l.vector_space().unwrap_err(),
            FieldError::AmbiguousQuantity("vector_space")
        );
    }

    #[test]
    fn test_non_monic_normalized() {
        // 2x^2 + 4 defines the same field as x^2 + 2.
        let k = NumberField::new(&qpoly(&[4, 0, 2]), "a").unwrap();
        assert_eq!(k.relative_degree(), 2);
        assert!(k.relative_polynomial()[2].is_one());
        assert_eq!(
            k.relative_polynomial()[0].to_rational(),
            Some(Q::from_int(2))
        );
    }

    #[test]
    fn test_element_arithmetic() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let a = k.gen().unwrap();
        let sq = a.mul(&a).unwrap();
        assert_eq!(sq.to_rational(), Some(Q::from_int(-2)));

        let inv = a.inverse().unwrap().expect("non-zero");
        assert!(a.mul(&inv).unwrap().is_one());

        let sum = a.add(&a.neg()).unwrap();
        assert!(sum.is_zero());
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let a = k.gen().unwrap();
        assert_eq!(
            a.div(&k.zero()).unwrap_err(),
            FieldError::DivisionByZero
        );
        assert_eq!(a.div(&a).unwrap().to_rational(), Some(Q::from_int(1)));
    }

    #[test]
    fn test_mixed_arithmetic_with_rationals() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let a = k.gen().unwrap();
        let half = Base::Rationals.from_rational(Q::from_i64(1, 2));
        let s = a.add(&half).unwrap();
        assert!(s.parent().same(&Base::Field(k.clone())));
        assert_eq!(s.sub(&a).unwrap().to_rational(), Some(Q::from_i64(1, 2)));
    }

    #[test]
    fn test_unrelated_fields_no_coercion() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = NumberField::new(&qpoly(&[5, 0, 1]), "c").unwrap();
        let err = k.gen().unwrap().add(&l.gen().unwrap()).unwrap_err();
        assert_eq!(err, FieldError::NoCoercion);
    }

    #[test]
    fn test_tower_shape() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        assert!(k.is_absolute());
        assert!(!l.is_absolute());
        assert_eq!(l.tower_height(), 2);
        assert_eq!(l.ngens(), 2);
        assert_eq!(l.relative_degree(), 2);
        assert_eq!(l.absolute_degree().unwrap(), 4);
    }

    #[test]
    fn test_persistence_accessors_rebuild() {
        // A tower rebuilds from (base, defining polynomial, name) alone.
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();

        let rebuilt = match l.base_field() {
            Base::Field(b) => b
                .extension(l.relative_polynomial(), l.name())
                .unwrap(),
            Base::Rationals => unreachable!(),
        };
        assert_eq!(rebuilt.absolute_polynomial().unwrap(), l.absolute_polynomial().unwrap());
        assert_eq!(rebuilt.name(), l.name());
    }
}
