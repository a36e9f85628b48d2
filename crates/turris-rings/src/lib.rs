//! # turris-rings
//!
//! Exact scalar arithmetic for the Turris number-field engine.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `EuclideanDomain`, `Field`
//! - Arbitrary precision integers `Z` (wrapping `dashu::IBig`)
//! - Arbitrary precision rationals `Q` (wrapping `dashu::RBig`)
//!
//! All arithmetic is exact; nothing in this workspace ever rounds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use integer::Z;
pub use rational::Q;
pub use traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};
