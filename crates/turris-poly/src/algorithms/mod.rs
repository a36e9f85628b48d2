//! Polynomial algorithms: division, GCD, resultants, squarefree decomposition.

pub mod gcd;
pub mod resultant;
pub mod squarefree;
