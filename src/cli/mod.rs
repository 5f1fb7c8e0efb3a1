//! Command-line options.

use std::net::IpAddr;

use clap::Parser;

use crate::domain::DEFAULT_SEED;

/// Home-purchase scoring API backed by models trained at startup.
#[derive(Debug, Parser)]
#[command(name = "estate-score", version)]
pub struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, default_value = "0.0.0.0", env = "BIND_ADDR")]
    pub bind: IpAddr,

    /// Port for the HTTP listener.
    #[arg(long, default_value_t = 5000, env = "PORT")]
    pub port: u16,

    /// Seed for synthetic dataset generation. The same seed reproduces
    /// bit-for-bit identical models.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}
