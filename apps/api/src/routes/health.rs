use axum::Json;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "resume-api";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME
    }))
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "routes": ["/health", "/api/v1/validate", "/api/v1/preview", "/api/v1/export"]
    }))
}
