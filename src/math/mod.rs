//! Numeric primitives: least-squares solve and polynomial expansion.

pub mod ols;
pub mod poly;

pub use ols::*;
pub use poly::*;
