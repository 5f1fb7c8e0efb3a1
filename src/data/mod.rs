//! Synthetic training-set generation.

pub mod synth;

pub use synth::*;
