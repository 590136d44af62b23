//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::DashboardView;

// ============================================
// DASHBOARD DTOs
// ============================================

/// Dashboard JSON response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// "loading" or "loaded"
    pub status: String,
    /// When the summary was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    /// Derived view, once loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<DashboardView>,
}

impl DashboardResponse {
    pub fn loading() -> Self {
        Self {
            status: "loading".to_string(),
            loaded_at: None,
            view: None,
        }
    }

    pub fn loaded(loaded_at: DateTime<Utc>, view: DashboardView) -> Self {
        Self {
            status: "loaded".to_string(),
            loaded_at: Some(loaded_at),
            view: Some(view),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, starting
    pub status: String,
    /// Summary status: loaded, loading
    pub summary: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
