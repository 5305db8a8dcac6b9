//! Web front end for the consumption calculator.
//!
//! Serves the HTML form plus a small read-only API:
//! - `GET /` / `POST /` — the calculator page
//! - `GET /api/consumption` — computed result as JSON
//! - `GET /api/consumption.csv` — hour table as CSV
//! - `GET /healthz` — liveness probe

pub mod forms;
pub mod render;

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::AppConfig;

/// Immutable application state shared across all request handlers.
///
/// Holds only configuration — every request computes its result fresh and
/// discards it after rendering, so there is nothing else to share and no
/// locking is needed.
pub struct AppState {
    /// Validated application configuration.
    pub config: AppConfig,
}

/// Builds the axum router with all routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::calculate))
        .route("/api/consumption", get(handlers::get_consumption))
        .route("/api/consumption.csv", get(handlers::get_consumption_csv))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Binds to the given address and serves the application.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!("calculator listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
