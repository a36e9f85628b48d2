//! Dense exact linear algebra.
//!
//! A small row-major matrix type over any [`turris_rings::traits::Field`],
//! sized for the change-of-basis and regular-representation matrices that
//! show up in number field towers (dimensions in the tens, not thousands).
//! All arithmetic is exact; there is no pivot-magnitude strategy, only
//! first-nonzero pivoting.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense_matrix;

pub use dense_matrix::DenseMatrix;
