//! Dashboard State
//!
//! The page is either still waiting for its summary or showing one. The
//! state only ever moves from `Loading` to `Loaded`.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::summary::{Summary, SummaryLoader};

/// A summary that has been published to the page
#[derive(Debug, Clone)]
pub struct LoadedSummary {
    pub summary: Arc<Summary>,
    pub loaded_at: DateTime<Utc>,
}

/// What the page currently shows
#[derive(Debug, Clone, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Loaded(LoadedSummary),
}

impl DashboardState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DashboardState::Loaded(_))
    }

    pub fn summary(&self) -> Option<&Arc<Summary>> {
        match self {
            DashboardState::Loading => None,
            DashboardState::Loaded(loaded) => Some(&loaded.summary),
        }
    }

    /// Replace the state with a freshly loaded summary
    pub fn publish(&mut self, summary: Summary) {
        *self = DashboardState::Loaded(LoadedSummary {
            summary: Arc::new(summary),
            loaded_at: Utc::now(),
        });
    }
}

/// Dashboard state shared between the loader and request handlers
pub type SharedDashboard = Arc<RwLock<DashboardState>>;

/// Run one load and publish the result.
///
/// On failure the error is logged and the state is left untouched.
/// Returns whether a summary was published.
pub async fn load_into(dashboard: &SharedDashboard, loader: &SummaryLoader) -> bool {
    let started = std::time::Instant::now();

    match loader.load().await {
        Ok(summary) => {
            tracing::info!(
                source = %loader.source(),
                total = summary.customers.total,
                duration_ms = started.elapsed().as_millis() as u64,
                "Summary loaded"
            );
            dashboard.write().await.publish(summary);
            true
        }
        Err(e) => {
            tracing::error!(
                source = %loader.source(),
                error = %e,
                "Failed to load summary; dashboard stays in loading state"
            );
            false
        }
    }
}

/// Spawn the single load for this mount. No retry beyond the loader's own
/// attempts, no cancellation.
pub fn spawn_initial_load(dashboard: SharedDashboard, loader: SummaryLoader) -> JoinHandle<()> {
    tokio::spawn(async move {
        load_into(&dashboard, &loader).await;
    })
}
