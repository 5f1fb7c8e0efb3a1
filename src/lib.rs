//! `estate-score` library crate.
//!
//! The binary (`estate-score`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the scoring engine stays reusable independently of the HTTP surface
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod math;
pub mod models;
pub mod server;
pub mod service;
