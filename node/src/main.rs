// Copyright (c) 2026 Meridian Contributors. MIT License.
// See LICENSE for details.

//! # Meridian Key-Service Node
//!
//! Entry point for the `meridian-node` binary. Parses CLI arguments,
//! initializes logging and metrics, and serves the HTTP API.
//!
//! The binary supports three subcommands:
//!
//! - `run`     — start the HTTP key service
//! - `derive`  — derive an account locally and print it (offline)
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use meridian_core::identity::Account;

use cli::{Commands, MeridianCli};
use logging::LogFormat;
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = MeridianCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Derive(args) => derive_account(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the key service: API server plus metrics endpoint.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(
        "meridian_node=info,meridian_core=info,tower_http=debug",
        LogFormat::from_str_lossy(&args.log_format),
    );

    tracing::info!(
        api_port = args.api_port,
        metrics_port = args.metrics_port,
        "starting meridian-node"
    );

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: Arc::clone(&node_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.api_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("meridian-node stopped");
    Ok(())
}

/// Derives an account locally and prints it as JSON on stdout.
///
/// With `--priv-hex` the account for that key is derived; without it a
/// fresh keypair is generated. Nothing leaves the machine either way,
/// which makes this the safe path for operators handling real keys.
fn derive_account(args: cli::DeriveArgs) -> Result<()> {
    let account = match args.priv_hex {
        Some(priv_hex) => {
            Account::from_priv_hex(&priv_hex).context("failed to derive account")?
        }
        None => Account::generate(),
    };

    let output = serde_json::json!({
        "accountId": account.account_id,
        "address": account.address,
        "privHex": account.keys.priv_hex(),
        "pubXHex": account.keys.public_key().x_hex(),
        "pubYHex": account.keys.public_key().y_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("meridian-node {}", env!("CARGO_PKG_VERSION"));
    println!("signing       {}", meridian_core::config::SIGNING_ALGORITHM);
    println!("rustc         {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
