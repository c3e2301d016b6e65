//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{HealthResponse, StatusResponse, TrailResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use trailcrumb_core::{Breadcrumbs, Extensions, RequestContext, TrailError};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Summary of the loaded site.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let graph = &state.site.graph;
    let response = StatusResponse {
        item_count: graph.item_count(),
        term_count: graph.term_count(),
        content_type_count: graph.content_type_count(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// TRAIL HANDLER
// =============================================================================

/// Compose and resolve the trail for one request context.
pub async fn trail_handler(
    State(state): State<AppState>,
    Json(context): Json<RequestContext>,
) -> impl IntoResponse {
    let extensions = Extensions::default();
    let breadcrumbs = Breadcrumbs::new(
        &state.site.graph,
        &state.site.settings,
        context,
        &extensions,
    );

    match breadcrumbs.trail() {
        Ok(trail) => (StatusCode::OK, Json(TrailResponse::success(trail))),
        Err(e) => {
            tracing::debug!("Trail request rejected: {}", e);
            (
                error_status(&e),
                Json(TrailResponse::error(format!("Trail failed: {}", e))),
            )
        }
    }
}

/// Map an engine error to an HTTP status.
///
/// Errors caused by the request itself are client errors; anything else
/// points at the loaded site or settings.
fn error_status(error: &TrailError) -> StatusCode {
    match error {
        TrailError::InvalidState(_) => StatusCode::BAD_REQUEST,
        TrailError::ItemNotFound(_) | TrailError::TermNotFound(_, _) => StatusCode::NOT_FOUND,
        TrailError::Config(_) | TrailError::Fixture(_) | TrailError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
