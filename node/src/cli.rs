//! # CLI Interface
//!
//! Defines the command-line argument structure for `meridian-node` using
//! `clap` derive. Supports three subcommands: `run`, `derive`, and
//! `version`.

use clap::{Parser, Subcommand};

/// Meridian key-service node.
///
/// Serves account derivation over HTTP for wallet frontends and exposes
/// Prometheus metrics. Transaction construction and signing stay in the
/// wallet core library; this binary never holds keys beyond a single
/// request.
#[derive(Parser, Debug)]
#[command(
    name = "meridian-node",
    about = "Meridian key-service node",
    version,
    propagate_version = true
)]
pub struct MeridianCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP key service.
    Run(RunArgs),
    /// Derive an account from a private key locally and print it.
    Derive(DeriveArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the HTTP API.
    #[arg(long, env = "MERIDIAN_API_PORT", default_value_t = 9830)]
    pub api_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "MERIDIAN_METRICS_PORT", default_value_t = 9831)]
    pub metrics_port: u16,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "MERIDIAN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Arguments for the `derive` subcommand.
#[derive(Parser, Debug)]
pub struct DeriveArgs {
    /// Hex-encoded P-256 private key (64 hex chars, `0x` prefix allowed).
    ///
    /// When omitted, a fresh keypair is generated and printed instead.
    /// **Never pass a production key on the command line** — shells keep
    /// history.
    #[arg(long, env = "MERIDIAN_PRIV_KEY")]
    pub priv_hex: Option<String>,
}
