//! # REST API
//!
//! Builds the axum router that exposes the key service's HTTP interface.
//! All endpoints share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                  | Description                          |
//! |--------|-----------------------|--------------------------------------|
//! | GET    | `/health`             | Liveness probe                       |
//! | POST   | `/api/keys/from-priv` | Derive an account from a private key |
//! | POST   | `/api/account/new`    | Generate a fresh account             |
//!
//! Handlers are stateless request/response — the service holds no wallet
//! state and retains no key material once the response is sent.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use meridian_core::crypto::KeyError;
use meridian_core::identity::Account;

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone — the metrics handles are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// Reference to Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
///
/// The returned router is ready to be served on the configured API port.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/keys/from-priv", post(derive_from_priv_handler))
        .route("/api/account/new", post(new_account_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Request payload for `POST /api/keys/from-priv`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveRequest {
    /// Hex-encoded P-256 private key. 64 hex chars; `0x` prefix and
    /// uppercase digits are tolerated.
    pub priv_hex: String,
}

/// Response payload for both derivation endpoints.
///
/// Echoes the private key back so a frontend generating through
/// `/api/account/new` can persist it. The service itself stores nothing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Eight-digit decimal account identifier.
    pub account_id: String,
    /// 40-hex-char address.
    pub address: String,
    /// Hex-encoded private key (normalized form).
    pub priv_hex: String,
    /// Public key X coordinate, 64 hex chars.
    pub pub_x_hex: String,
    /// Public key Y coordinate, 64 hex chars.
    pub pub_y_hex: String,
}

impl AccountResponse {
    fn from_account(account: &Account) -> Self {
        let record = account.record();
        Self {
            account_id: record.account_id,
            address: record.address,
            priv_hex: account.keys.priv_hex().to_string(),
            pub_x_hex: record.pub_x_hex,
            pub_y_hex: record.pub_y_hex,
        }
    }
}

/// Generic error body returned by REST endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(err: &KeyError) -> StatusCode {
    // Every KeyError variant describes bad caller input; nothing in the
    // derivation path can fail for internal reasons.
    match err {
        KeyError::InvalidKeyFormat { .. }
        | KeyError::InvalidScalar
        | KeyError::PointNotOnCurve => StatusCode::BAD_REQUEST,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the service is alive.
///
/// This is the liveness probe for orchestrators (k8s, systemd, etc.).
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok", "version": state.version })),
    )
}

/// `POST /api/keys/from-priv` — derives the account identity for a
/// caller-supplied private key.
///
/// Malformed keys (wrong length, non-hex, zero, or out of curve range)
/// produce 400 with the reason in the body.
async fn derive_from_priv_handler(
    State(state): State<AppState>,
    Json(req): Json<DeriveRequest>,
) -> impl IntoResponse {
    let timer = state.metrics.derivation_latency_seconds.start_timer();

    match Account::from_priv_hex(&req.priv_hex) {
        Ok(account) => {
            timer.observe_duration();
            state.metrics.keys_derived_total.inc();
            tracing::debug!(account_id = %account.account_id, "account derived");
            (StatusCode::OK, Json(AccountResponse::from_account(&account))).into_response()
        }
        Err(e) => {
            timer.observe_duration();
            state.metrics.derivation_failures_total.inc();
            tracing::debug!(error = %e, "derivation rejected");
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `POST /api/account/new` — generates a fresh keypair and returns the
/// derived account, private key included.
async fn new_account_handler(State(state): State<AppState>) -> impl IntoResponse {
    let timer = state.metrics.derivation_latency_seconds.start_timer();
    let account = Account::generate();
    timer.observe_duration();
    state.metrics.accounts_generated_total.inc();

    tracing::debug!(account_id = %account.account_id, "account generated");
    (StatusCode::OK, Json(AccountResponse::from_account(&account)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
