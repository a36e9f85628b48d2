//! # turris-poly
//!
//! Dense univariate polynomial arithmetic for the Turris number-field engine.
//!
//! This crate provides:
//! - Dense univariate polynomials over any exact ring
//! - Division, GCD and extended GCD over a field
//! - Resultants and discriminants via the Sylvester matrix, including over
//!   polynomial entry domains, which is what bivariate elimination in the
//!   flattener reduces to
//! - Squarefree testing and Yun decomposition
//!
//! Multiplication is schoolbook throughout: every polynomial this workspace
//! touches has degree bounded by the absolute degree of a field tower, far
//! below the point where Karatsuba or FFT pay off.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;

#[cfg(test)]
mod proptests;

pub use algorithms::gcd::{extended_gcd, make_monic, poly_div_rem, poly_gcd};
pub use algorithms::resultant::{discriminant, resultant};
pub use algorithms::squarefree::{is_squarefree, squarefree_decomposition, squarefree_part};
pub use dense::DensePoly;
