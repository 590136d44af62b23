//! Summary Route
//!
//! - GET /api/v1/summary - The loaded summary document as JSON

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::summary::Summary;

/// GET /api/v1/summary
///
/// Returns 503 until the summary has been loaded.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<Summary>> {
    let dashboard = state.dashboard.read().await;

    let summary = dashboard
        .summary()
        .ok_or_else(|| ApiError::ServiceUnavailable("summary not loaded yet".to_string()))?;

    Ok(Json(Summary::clone(summary)))
}
