pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::render::handlers as render;
use crate::state::AppState;
use crate::validation::handlers as validation;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/validate", post(validation::handle_validate))
        .route("/api/v1/preview", post(render::handle_preview))
        .route("/api/v1/export", post(render::handle_export))
        .layer(body_limit)
        .with_state(state)
}
