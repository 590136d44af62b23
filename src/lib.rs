//! # Volcano
//!
//! Volcano Analytics - a customer analytics dashboard rendered from a
//! pre-computed JSON summary.
//!
//! ## Features
//!
//! - **Single load**: the summary is read once per mount from a file or URL
//! - **Derived series**: percentage-annotated slices with a zero-total guard
//! - **Server-side charts**: donut and bar charts rendered as inline SVG
//! - **JSON views**: the derived dashboard and raw summary over HTTP
//!
//! ## Modules
//!
//! - [`summary`]: Summary document, loader and consistency checks
//! - [`dashboard`]: Series builder, chart layout and page rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use volcano::config::DashboardConfig;
//! use volcano::dashboard::{render_page, DashboardState};
//! use volcano::summary::{LoaderConfig, SummaryLoader, SummarySource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SummarySource::parse("./public/data.json");
//!     let loader = SummaryLoader::new(source, LoaderConfig::default())?;
//!
//!     let mut state = DashboardState::default();
//!     state.publish(loader.load().await?);
//!
//!     let html = render_page(&state, &DashboardConfig::default())?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod summary;

// Re-export top-level types for convenience
pub use summary::{
    validate, LoadError, LoaderConfig, Summary, SummaryLoader, SummarySource, ValidationReport,
};

pub use dashboard::{
    render_page, spawn_initial_load, ChartSlice, DashboardState, DashboardView, RenderError,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig, ServerConfig};
