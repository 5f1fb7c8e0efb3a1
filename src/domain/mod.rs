//! Domain types used throughout the scoring pipeline.
//!
//! This module defines:
//!
//! - raw input structs for the three prediction tasks
//! - categorical mappings (marital status, location, condition)
//! - the training configuration and prediction outputs
//! - the training-domain bounds shared by synthesizer and service

pub mod bounds;
pub mod types;

pub use types::*;
