//! Regression models and the analytic ground-truth formulas.
//!
//! `linear` holds the fitted least-squares model (coefficients plus the
//! feature map applied at fit time); `analytic` holds the exact generative
//! formulas the synthetic labels are derived from, which double as the
//! out-of-domain fallback at inference time.

pub mod analytic;
pub mod linear;

pub use linear::*;
