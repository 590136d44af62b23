//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{DashboardConfig, ServerConfig};
use crate::dashboard::SharedDashboard;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loading/loaded dashboard, written once by the loader
    pub dashboard: SharedDashboard,
    /// Page content configuration
    pub config: Arc<DashboardConfig>,
    /// Server configuration
    pub server: Arc<ServerConfig>,
    /// Local summary file served at /data.json, if the source is a file
    pub data_file: Option<PathBuf>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState in the loading state
    pub fn new(config: DashboardConfig, server: ServerConfig) -> Self {
        Self {
            dashboard: SharedDashboard::default(),
            config: Arc::new(config),
            server: Arc::new(server),
            data_file: None,
            start_time: Instant::now(),
        }
    }

    /// Serve the given file at /data.json
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check whether the summary has been published
    pub async fn is_loaded(&self) -> bool {
        self.dashboard.read().await.is_loaded()
    }
}
