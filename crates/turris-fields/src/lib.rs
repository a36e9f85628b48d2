//! # turris-fields
//!
//! Towers of algebraic number fields for Turris.
//!
//! This crate provides:
//! - `NumberField`: a number field given as a step of a tower, with
//!   elements stored in absolute coordinates
//! - Flattening of a tower step to a single extension of Q via a
//!   resultant elimination with a generator shift
//! - Coercion maps between fields of a tower and compatible foreign
//!   fields, resolved through a per-field cache
//! - The relative vector-space isomorphism L ≅ B^[L:B]
//! - Differents, discriminants, equation orders, element norms and
//!   traces
//!
//! Relative quantities are derived from absolute ones, never computed
//! independently, and bare `degree()`-style queries on a proper tower
//! step fail rather than guess.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod absolute;
pub mod coerce;
pub mod error;
pub mod flatten;
pub mod ideal;
pub mod tower;
pub mod vector_space;

pub use absolute::AbsoluteField;
pub use coerce::{Coercible, Embedding};
pub use error::{FieldError, Result};
pub use flatten::{Flattening, DEFAULT_SHIFT_BOUND};
pub use ideal::{Ideal, Order};
pub use tower::{Base, FieldElement, NumberField};
pub use vector_space::RelativeBasis;
