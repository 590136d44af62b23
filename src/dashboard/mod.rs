//! Dashboard
//!
//! Turns a loaded summary into the rendered page.
//!
//! ## Data Flow
//!
//! 1. `state` holds `Loading` until the one summary load publishes
//! 2. `series` derives percentage slices from the raw counts
//! 3. `view` + `chart` lay out cards, donuts, bars and lists
//! 4. `render` writes the HTML through askama templates

pub mod chart;
pub mod render;
pub mod series;
pub mod state;
pub mod view;

pub use chart::{Bar, BarChart, PieChart, PieSlice, Tick, PALETTE};
pub use render::{render_loading, render_page, render_view, RenderError, LOADING_TEXT};
pub use series::{
    business_type_series, customer_type_series, format_fixed, percentage, ChartSlice,
};
pub use state::{load_into, spawn_initial_load, DashboardState, LoadedSummary, SharedDashboard};
pub use view::{DashboardView, EnterpriseSection, PaidCustomerRow, SummaryCard};
