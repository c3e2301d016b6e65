//! # Trailcrumb HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /trail` - Resolve the trail for a request context
//! - `GET /status` - Loaded site summary
//! - `GET /health` - Health check
//!
//! The site is shared read-only between requests. Every `POST /trail`
//! builds its own `Breadcrumbs`, so nothing is memoized across requests.

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `trailcrumb::api::*`)
pub use handlers::{health_handler, status_handler, trail_handler};
pub use types::{HealthResponse, StatusResponse, TrailResponse};

use crate::site::Site;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use trailcrumb_core::TrailError;

/// Maximum accepted request body (64 KB).
const MAX_BODY_SIZE: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the loaded site.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<Site>,
}

impl AppState {
    #[must_use]
    pub fn new(site: Site) -> Self {
        Self {
            site: Arc::new(site),
        }
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. Body limit
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/trail", post(handlers::trail_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, site: Site) -> Result<(), TrailError> {
    let router = create_router(AppState::new(site));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TrailError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Trailcrumb HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| TrailError::Io(format!("Server error: {}", e)))
}
