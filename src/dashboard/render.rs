//! Page Rendering
//!
//! Renders the dashboard state to HTML through askama templates in
//! `templates/`. Output is escaped and depends only on its inputs.

use askama::Template;
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::dashboard::state::DashboardState;
use crate::dashboard::view::DashboardView;

/// Loading indicator text
pub const LOADING_TEXT: &str = "加载中...";

/// Template rendering failed
#[derive(Error, Debug)]
#[error("Render error: {0}")]
pub struct RenderError(#[from] askama::Error);

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    title: &'a str,
    description: &'a str,
    view: &'a DashboardView,
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingPage<'a> {
    title: &'a str,
    description: &'a str,
    message: &'a str,
}

/// Render the page for the current state
pub fn render_page(state: &DashboardState, config: &DashboardConfig) -> Result<String, RenderError> {
    match state.summary() {
        Some(summary) => render_view(&DashboardView::build(summary, config), config),
        None => render_loading(config),
    }
}

/// Render a loaded dashboard
pub fn render_view(view: &DashboardView, config: &DashboardConfig) -> Result<String, RenderError> {
    let page = DashboardPage {
        title: &config.title,
        description: &config.description,
        view,
    };
    Ok(page.render()?)
}

/// Render the loading indicator page
pub fn render_loading(config: &DashboardConfig) -> Result<String, RenderError> {
    let page = LoadingPage {
        title: &config.title,
        description: &config.description,
        message: LOADING_TEXT,
    };
    Ok(page.render()?)
}
