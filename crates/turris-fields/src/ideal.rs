//! Ideal-theoretic invariants: differents, discriminants, orders,
//! element norms and traces.
//!
//! Absolute quantities are computed directly from the flattened
//! polynomial: the different of the equation order Z[θ] is generated by
//! R'(θ) and the discriminant is the polynomial discriminant of R. The
//! relative quantities are never computed independently; they divide out
//! the base's contribution, so the tower identity
//! absDisc(L) = Norm(relDisc(L/B)) · absDisc(B)^[L:B]
//! holds by construction.

use std::fmt;
use std::sync::Arc;

use turris_linalg::DenseMatrix;
use turris_poly::{discriminant, DensePoly};
use turris_rings::traits::{Field, Ring};
use turris_rings::Q;

use crate::error::{FieldError, Result};
use crate::tower::{Base, FieldElement, NumberField};

/// A principal (fractional) ideal of a number field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ideal {
    generator: FieldElement,
}

impl Ideal {
    /// The principal ideal generated by an element.
    #[must_use]
    pub fn principal(generator: FieldElement) -> Self {
        Self { generator }
    }

    /// A generator of this ideal.
    #[must_use]
    pub fn generator(&self) -> &FieldElement {
        &self.generator
    }

    /// The field this ideal lives in.
    #[must_use]
    pub fn field(&self) -> &Base {
        self.generator.parent()
    }

    /// The ideal quotient, dividing the generators.
    ///
    /// # Errors
    ///
    /// Fails with [`FieldError::DivisionByZero`] when `other` is the
    /// zero ideal.
    pub fn quotient(&self, other: &Ideal) -> Result<Ideal> {
        Ok(Ideal {
            generator: self.generator.div(&other.generator)?,
        })
    }

    /// The norm of this ideal: |N(generator)| as a rational.
    pub fn norm(&self) -> Result<Q> {
        Ok(self.generator.absolute_norm()?.abs())
    }
}

/// The equation order Z[θ] of a number field.
#[derive(Clone, Debug)]
pub struct Order {
    field: Arc<NumberField>,
}

impl Order {
    /// The order generated by the absolute generator of `field`.
    #[must_use]
    pub fn equation_order(field: Arc<NumberField>) -> Self {
        Self { field }
    }

    /// The field this order sits inside.
    #[must_use]
    pub fn ambient(&self) -> &Arc<NumberField> {
        &self.field
    }

    /// A Z-module basis: the powers of θ.
    pub fn basis(&self) -> Result<Vec<FieldElement>> {
        let n = self.field.absolute_degree()?;
        let ctx = self.field.absolute_context()?;
        let theta = ctx.generator();
        Ok((0..n)
            .map(|i| self.field.element_from_rep(ctx.pow(&theta, i as u32)))
            .collect())
    }

    /// The discriminant of this order, equal to the discriminant of the
    /// absolute defining polynomial.
    pub fn discriminant(&self) -> Result<Q> {
        self.field.absolute_discriminant()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(out, "Equation order of {}", self.field)
    }
}

impl NumberField {
    /// The equation order Z[θ] of this field.
    #[must_use]
    pub fn equation_order(self: &Arc<Self>) -> Order {
        Order::equation_order(self.clone())
    }

    /// The different of the equation order over Q: the principal ideal
    /// generated by R'(θ).
    pub fn absolute_different(self: &Arc<Self>) -> Result<Ideal> {
        let flat = self.flattening()?;
        let ctx = self.absolute_context()?;
        let rep = ctx.reduce(&flat.absolute_poly.derivative());
        Ok(Ideal::principal(self.element_from_rep(rep)))
    }

    /// The relative different, derived from the absolute one by dividing
    /// out the embedded base different.
    pub fn relative_different(self: &Arc<Self>) -> Result<Ideal> {
        let abs = self.absolute_different()?;
        match self.base_field() {
            Base::Rationals => Ok(abs),
            Base::Field(b) => {
                let base_diff = b.absolute_different()?;
                let emb = self
                    .coerce_map_from(self.base_field())
                    .ok_or(FieldError::NoCoercion)?;
                let embedded = Ideal::principal(emb.apply(base_diff.generator())?);
                abs.quotient(&embedded)
            }
        }
    }

    /// The discriminant of the absolute defining polynomial, a rational.
    pub fn absolute_discriminant(&self) -> Result<Q> {
        Ok(discriminant(&self.flattening()?.absolute_poly))
    }

    /// The relative discriminant as a rational norm, derived so that
    /// absDisc(L) = relDisc(L/B) · absDisc(B)^[L:B] holds exactly.
    pub fn relative_discriminant(&self) -> Result<Q> {
        let abs = self.absolute_discriminant()?;
        let base_abs = match self.base_field() {
            Base::Rationals => Q::from_int(1),
            Base::Field(b) => b.absolute_discriminant()?,
        };
        let denom = base_abs.pow(self.relative_degree() as u32);
        Ok(abs.field_div(&denom))
    }

    /// Always fails: pick the relative or the absolute different.
    pub fn different(&self) -> Result<Ideal> {
        Err(FieldError::AmbiguousQuantity("different"))
    }

    /// Always fails: pick the relative or the absolute discriminant.
    pub fn discriminant(&self) -> Result<Q> {
        Err(FieldError::AmbiguousQuantity("discriminant"))
    }
}

impl FieldElement {
    /// The matrix of multiplication by this element on the power basis
    /// of θ, over Q.
    pub fn regular_representation(&self) -> Result<DenseMatrix<Q>> {
        let ctx = self.parent().absolute_field()?;
        let n = ctx.degree();
        let theta = ctx.generator();

        let mut cols = Vec::with_capacity(n);
        let mut basis_elem = DensePoly::one();
        for _ in 0..n {
            let image = ctx.mul(self.absolute_rep(), &basis_elem);
            cols.push((0..n).map(|i| image.coeff(i)).collect());
            basis_elem = ctx.mul(&basis_elem, &theta);
        }
        Ok(DenseMatrix::from_cols(cols))
    }

    /// The norm down to Q: the determinant of the regular representation.
    pub fn absolute_norm(&self) -> Result<Q> {
        Ok(self.regular_representation()?.det())
    }

    /// The trace down to Q: the trace of the regular representation.
    pub fn absolute_trace(&self) -> Result<Q> {
        Ok(self.regular_representation()?.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    #[test]
    fn test_norm_and_trace_quadratic() {
        // In Q(sqrt(-2)): N(a) = 2, Tr(a) = 0, N(1 + a) = 3, Tr(1 + a) = 2.
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let a = k.gen().unwrap();
        assert_eq!(a.absolute_norm().unwrap(), Q::from_int(2));
        assert_eq!(a.absolute_trace().unwrap(), Q::from_int(0));

        let x = k.one().add(&a).unwrap();
        assert_eq!(x.absolute_norm().unwrap(), Q::from_int(3));
        assert_eq!(x.absolute_trace().unwrap(), Q::from_int(2));
    }

    #[test]
    fn test_absolute_discriminant_quadratic() {
        // disc(x^2 + 2) = -8; disc(x^2 + 3) = -12.
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        assert_eq!(k.absolute_discriminant().unwrap(), Q::from_int(-8));
        let m = NumberField::new(&qpoly(&[3, 0, 1]), "b").unwrap();
        assert_eq!(m.absolute_discriminant().unwrap(), Q::from_int(-12));
    }

    #[test]
    fn test_discriminant_identity() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();

        let lhs = l.absolute_discriminant().unwrap();
        let rhs =
            l.relative_discriminant().unwrap() * k.absolute_discriminant().unwrap().pow(2);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_absolute_different_generator_is_derivative() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let diff = k.absolute_different().unwrap();
        // R = x^2 + 2, R'(θ) = 2θ.
        let theta = k.absolute_generator().unwrap();
        let expected = theta.mul(&k.from_rational(Q::from_int(2))).unwrap();
        assert_eq!(*diff.generator(), expected);
    }

    #[test]
    fn test_relative_different_divides_absolute() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();

        let abs = l.absolute_different().unwrap();
        let rel = l.relative_different().unwrap();
        let emb = l.coerce_map_from(l.base_field()).unwrap();
        let base = Ideal::principal(
            emb.apply(k.absolute_different().unwrap().generator()).unwrap(),
        );

        // rel * embedded base = abs, up to the generators chosen.
        let product = rel
            .generator()
            .mul(base.generator())
            .unwrap();
        assert_eq!(product, *abs.generator());
    }

    #[test]
    fn test_height_one_relative_equals_absolute() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        assert_eq!(
            k.relative_discriminant().unwrap(),
            k.absolute_discriminant().unwrap()
        );
        assert_eq!(
            k.relative_different().unwrap(),
            k.absolute_different().unwrap()
        );
    }

    #[test]
    fn test_ambiguous_ideal_queries() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let l = k.extension_rational(&qpoly(&[3, 0, 1]), "b").unwrap();
        assert_eq!(
            l.discriminant().unwrap_err(),
            FieldError::AmbiguousQuantity("discriminant")
        );
        assert_eq!(
            l.different().unwrap_err(),
            FieldError::AmbiguousQuantity("different")
        );
    }

    #[test]
    fn test_equation_order() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let order = k.equation_order();
        assert_eq!(order.discriminant().unwrap(), Q::from_int(-8));

        let basis = order.basis().unwrap();
        assert_eq!(basis.len(), 2);
        assert!(basis[0].is_one());
        assert_eq!(basis[1], k.absolute_generator().unwrap());

        // Rule 2: the order coerces into its ambient field.
        assert!(k.coerce_map_from_order(&order).is_some());
    }

    #[test]
    fn test_ideal_norm() {
        let k = NumberField::new(&qpoly(&[2, 0, 1]), "a").unwrap();
        let ideal = Ideal::principal(k.gen().unwrap());
        assert_eq!(ideal.norm().unwrap(), Q::from_int(2));
    }
}
