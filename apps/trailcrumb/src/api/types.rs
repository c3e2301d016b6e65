//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use trailcrumb_core::{ResolvedCrumb, Trail};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Loaded site summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub item_count: usize,
    pub term_count: usize,
    pub content_type_count: usize,
}

// =============================================================================
// TRAIL RESPONSE
// =============================================================================

/// Resolved trail response.
///
/// The request body is a `RequestContext`, e.g.
/// `{"kind": "singular", "current_item": 12}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailResponse {
    pub success: bool,
    #[serde(default)]
    pub crumbs: Vec<ResolvedCrumb>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrailResponse {
    #[must_use]
    pub fn success(trail: &Trail) -> Self {
        Self {
            success: true,
            crumbs: trail.links.clone(),
            warnings: trail.warnings.iter().map(ToString::to_string).collect(),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            crumbs: Vec::new(),
            warnings: Vec::new(),
            error: Some(message.into()),
        }
    }
}
