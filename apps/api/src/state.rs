use crate::config::Config;
use crate::render::PageConfig;

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry for PDF export: US letter, Helvetica 10.5pt body.
    pub page_config: PageConfig,
}
