//! Dashboard Routes
//!
//! - GET / - Rendered dashboard page (loading indicator until loaded)
//! - GET /api/v1/dashboard - The same view as JSON

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::dto::DashboardResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render_page, DashboardState, DashboardView};

/// GET /
///
/// Render the page for whatever state the dashboard is in.
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let dashboard = state.dashboard.read().await;
    let html = render_page(&dashboard, &state.config)?;
    Ok(Html(html))
}

/// GET /api/v1/dashboard
///
/// Derived dashboard content, or `{"status": "loading"}`.
pub async fn dashboard_json(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let dashboard = state.dashboard.read().await;

    let response = match &*dashboard {
        DashboardState::Loading => DashboardResponse::loading(),
        DashboardState::Loaded(loaded) => DashboardResponse::loaded(
            loaded.loaded_at,
            DashboardView::build(&loaded.summary, &state.config),
        ),
    };

    Json(response)
}
