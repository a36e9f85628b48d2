//! # turris-factor
//!
//! Exact univariate polynomial factorization over Q.
//!
//! The pipeline is the classical Zassenhaus algorithm:
//! 1. Squarefree decomposition over Q (Yun)
//! 2. Reduction modulo a runtime prime that preserves squarefreeness
//! 3. Distinct-degree + Cantor–Zassenhaus equal-degree splitting mod p
//! 4. Quadratic Hensel lifting to p^k beyond a Mignotte-style bound
//! 5. Subset recombination of the lifted modular factors
//!
//! The tower engine consumes this crate for exactly two questions: "is this
//! polynomial irreducible over Q?" and "what are the irreducible factors of
//! this norm polynomial?".

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod hensel;
pub mod modp;
pub mod zassenhaus;

pub use zassenhaus::{factor_q, is_irreducible_q, QFactorization};
