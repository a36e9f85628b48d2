//! # Turris
//!
//! Exact number-field towers in Rust.
//!
//! Turris builds iterated algebraic extensions of the rationals,
//! flattens them to single absolute extensions behind the scenes, and
//! keeps the relative structure available through explicit accessors:
//! relative vector spaces, coercion maps between the fields of a tower,
//! differents and discriminants.
//!
//! ## Quick Start
//!
//! ```rust
//! use turris::prelude::*;
//!
//! let coeffs = |cs: &[i64]| DensePoly::new(cs.iter().map(|&c| Q::from_int(c)).collect());
//!
//! // Q(a) with a^2 = -2, extended by b^2 = -3.
//! let k = NumberField::new(&coeffs(&[2, 0, 1]), "a")?;
//! let l = k.extension_rational(&coeffs(&[3, 0, 1]), "b")?;
//!
//! assert_eq!(l.relative_degree(), 2);
//! assert_eq!(l.absolute_degree()?, 4);
//!
//! let b = l.gen()?;
//! let b2 = b.mul(&b)?;
//! assert_eq!(l.lift_to_base(&b2)?, k.from_rational(Q::from_int(-3)));
//! # Ok::<(), turris::fields::FieldError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use turris_factor as factor;
pub use turris_fields as fields;
pub use turris_linalg as linalg;
pub use turris_poly as poly;
pub use turris_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use turris_factor::{factor_q, is_irreducible_q};
    pub use turris_fields::{
        Base, Coercible, Embedding, FieldElement, Flattening, Ideal, NumberField, Order,
    };
    pub use turris_linalg::DenseMatrix;
    pub use turris_poly::DensePoly;
    pub use turris_rings::{Field, Ring, Q, Z};
}
