//! # Prometheus Metrics
//!
//! Operational metrics for the key service, scraped at the `/metrics`
//! HTTP endpoint on the dedicated metrics port.
//!
//! All metrics live in a dedicated [`prometheus::Registry`] so they do
//! not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Clone-friendly (prometheus handles are internally reference-counted)
/// so it can be shared across request handlers.
#[derive(Clone)]
pub struct NodeMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Total accounts derived from caller-supplied private keys.
    pub keys_derived_total: IntCounter,
    /// Total accounts created from freshly generated keys.
    pub accounts_generated_total: IntCounter,
    /// Total derivation requests rejected for malformed input.
    pub derivation_failures_total: IntCounter,
    /// Histogram of derivation request latency in seconds.
    pub derivation_latency_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("meridian".into()), None)
            .expect("failed to create prometheus registry");

        let keys_derived_total = IntCounter::new(
            "keys_derived_total",
            "Total accounts derived from caller-supplied private keys",
        )
        .expect("metric creation");
        registry
            .register(Box::new(keys_derived_total.clone()))
            .expect("metric registration");

        let accounts_generated_total = IntCounter::new(
            "accounts_generated_total",
            "Total accounts created from freshly generated keys",
        )
        .expect("metric creation");
        registry
            .register(Box::new(accounts_generated_total.clone()))
            .expect("metric registration");

        let derivation_failures_total = IntCounter::new(
            "derivation_failures_total",
            "Total derivation requests rejected for malformed input",
        )
        .expect("metric creation");
        registry
            .register(Box::new(derivation_failures_total.clone()))
            .expect("metric registration");

        let derivation_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "derivation_latency_seconds",
                "Account derivation request latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(derivation_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            keys_derived_total,
            accounts_generated_total,
            derivation_failures_total,
            derivation_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
