//! Vector-space isomorphisms between field elements and coordinates.
//!
//! The absolute space has dimension the absolute degree; coordinates are
//! the rational coefficients of an element in powers of θ, so its maps
//! are reads of the stored representation. The relative space has
//! dimension the relative degree with coordinates in the base field; it
//! is realized through a memoized change-of-basis matrix whose columns
//! are the absolute coordinates of the product basis α^j·β^i, inverted
//! exactly over Q.

use std::sync::Arc;

use turris_linalg::DenseMatrix;
use turris_poly::DensePoly;
use turris_rings::Q;

use crate::error::{FieldError, Result};
use crate::tower::{Base, FieldElement, NumberField};

/// The memoized change of basis between absolute coordinates and the
/// product basis α^j·β^i.
#[derive(Clone, Debug)]
pub struct RelativeBasis {
    /// Column (i·m + j) holds the absolute coordinates of α^j·β^i, with
    /// m the base's absolute degree.
    pub(crate) forward: DenseMatrix<Q>,
    /// Exact inverse of `forward`.
    pub(crate) inverse: DenseMatrix<Q>,
    pub(crate) base_degree: usize,
}

impl NumberField {
    /// Absolute coordinates of an element: its rational coefficients in
    /// powers of θ, padded to the absolute degree.
    ///
    /// Elements of other fields are coerced in first;
    /// [`FieldError::NoCoercion`] if that is impossible.
    pub fn to_absolute_vector(self: &Arc<Self>, x: &FieldElement) -> Result<Vec<Q>> {
        let x = self.pull_in(x)?;
        let n = self.absolute_degree()?;
        Ok((0..n).map(|i| x.absolute_rep().coeff(i)).collect())
    }

    /// Rebuilds an element from absolute coordinates.
    pub fn from_absolute_vector(self: &Arc<Self>, coords: &[Q]) -> Result<FieldElement> {
        let n = self.absolute_degree()?;
        if coords.len() != n {
            return Err(FieldError::DimensionMismatch {
                expected: n,
                actual: coords.len(),
            });
        }
        Ok(self.element_from_rep(DensePoly::new(coords.to_vec())))
    }

    /// Relative coordinates of an element: base-field coefficients in
    /// powers of the top generator β, length the relative degree.
    pub fn to_relative_vector(self: &Arc<Self>, x: &FieldElement) -> Result<Vec<FieldElement>> {
        let x = self.pull_in(x)?;
        let basis = self.relative_basis()?;
        let n = self.absolute_degree()?;
        let abs: Vec<Q> = (0..n).map(|i| x.absolute_rep().coeff(i)).collect();
        let product_coords = basis.inverse.mv(&abs);

        let base = self.base_field().clone();
        Ok(product_coords
            .chunks(basis.base_degree)
            .map(|chunk| FieldElement {
                parent: base.clone(),
                rep: DensePoly::new(chunk.to_vec()),
            })
            .collect())
    }

    /// Rebuilds an element from relative coordinates: Σ emb(cᵢ)·β^i.
    pub fn from_relative_vector(self: &Arc<Self>, coords: &[FieldElement]) -> Result<FieldElement> {
        let d = self.relative_degree();
        if coords.len() != d {
            return Err(FieldError::DimensionMismatch {
                expected: d,
                actual: coords.len(),
            });
        }

        let flat = self.flattening()?;
        let ctx = self.absolute_context()?;
        let base = self.base_field();

        let mut rep = DensePoly::zero();
        for c in coords.iter().rev() {
            let c = if c.parent().same(base) {
                c.clone()
            } else {
                let emb = base
                    .coerce_map_from(c.parent())
                    .ok_or(FieldError::NoCoercion)?;
                emb.apply(c)?
            };
            // Base elements are polynomials in α; embed by evaluating at
            // α(θ).
            let embedded = ctx.eval(c.absolute_rep(), &flat.base_generator);
            rep = ctx.mul(&rep, &flat.top_generator).add(&embedded);
        }
        Ok(self.element_from_rep(ctx.reduce(&rep)))
    }

    /// The base-field coefficient of β^0, failing with
    /// [`FieldError::NotInSubfield`] when the element has a component
    /// along any higher power of β.
    pub fn lift_to_base(self: &Arc<Self>, x: &FieldElement) -> Result<FieldElement> {
        let coords = self.to_relative_vector(x)?;
        if coords[1..].iter().any(|c| !c.is_zero()) {
            return Err(FieldError::NotInSubfield);
        }
        Ok(coords[0].clone())
    }

    fn pull_in(self: &Arc<Self>, x: &FieldElement) -> Result<FieldElement> {
        let here = Base::Field(self.clone());
        if x.parent().same(&here) {
            return Ok(x.clone());
        }
        let emb = here
            .coerce_map_from(x.parent())
            .ok_or(FieldError::NoCoercion)?;
        emb.apply(x)
    }

    pub(crate) fn relative_basis(&self) -> Result<Arc<RelativeBasis>> {
        if let Some(cached) = self.relative_basis.read().clone() {
            return cached;
        }

        let mut slot = self.relative_basis.write();
        if let Some(cached) = slot.clone() {
            return cached;
        }
        let computed = self.compute_relative_basis().map(Arc::new);
        *slot = Some(computed.clone());
        computed
    }

    fn compute_relative_basis(&self) -> Result<RelativeBasis> {
        let flat = self.flattening()?;
        let ctx = crate::absolute::AbsoluteField::new(&flat.absolute_poly);
        let n = flat.absolute_poly.degree();
        let d = self.relative_degree();
        let m = self.base_field().absolute_degree()?;

        let mut cols = Vec::with_capacity(n);
        let mut beta_pow = DensePoly::one();
        for _ in 0..d {
            let mut col_elem = beta_pow.clone();
            for _ in 0..m {
                cols.push((0..n).map(|i| col_elem.coeff(i)).collect());
                col_elem = ctx.mul(&col_elem, &flat.base_generator);
            }
            beta_pow = ctx.mul(&beta_pow, &flat.top_generator);
        }

        let forward = DenseMatrix::from_cols(cols);
        let inverse = forward
            .inverse()
            .ok_or(FieldError::NonIrreducibleDefiningPolynomial)?;
        Ok(RelativeBasis {
            forward,
            inverse,
            base_degree: m,
        })
    }
}
