//! Error taxonomy for the tower engine.

use thiserror::Error;

/// Errors produced by field construction and field queries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The defining polynomial factors non-trivially over the base field.
    #[error("defining polynomial is not irreducible over the base field")]
    NonIrreducibleDefiningPolynomial,

    /// The generator name is already taken by an ancestor in the tower.
    #[error("generator name `{0}` collides with an ancestor")]
    NameCollision(String),

    /// A coefficient does not live in the base field and cannot be
    /// coerced into it.
    #[error("coefficient domain does not match the base field")]
    DomainMismatch,

    /// An unqualified relative/absolute query. The caller must pick one
    /// of the `relative_*` or `absolute_*` accessors.
    #[error("`{0}` is ambiguous on a relative field; use the relative_* or absolute_* form")]
    AmbiguousQuantity(&'static str),

    /// A coordinate vector of the wrong length.
    #[error("expected a vector of length {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension of the vector space.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// No shift within the search window produced a squarefree resultant
    /// of full degree.
    #[error("flattening failed: no shift with |k| <= {bound} gives a squarefree full-degree resultant")]
    EliminationExhausted {
        /// The largest shift magnitude that was tried.
        bound: i64,
    },

    /// A lift to the base field was requested for an element outside it.
    #[error("element does not lie in the base field")]
    NotInSubfield,

    /// An operation that requires a coercion found none.
    #[error("no coercion exists between these domains")]
    NoCoercion,

    /// A quotient or inverse was requested with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FieldError>;
