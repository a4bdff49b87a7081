//! Axum route handlers for preview and export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::html::render_html;
use crate::render::partial::render_partial_html;
use crate::render::pdf::{render_pdf, DocumentMeta};
use crate::state::AppState;
use crate::validation::handlers::require_object;
use crate::validation::{validate, ErrorList};

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub valid: bool,
    pub html: String,
    pub errors: Option<ErrorList>,
}

/// POST /api/v1/preview
///
/// Invalid payloads still get a best-effort document so the form can show
/// progress alongside the error list.
pub async fn handle_preview(Json(payload): Json<Value>) -> Result<Json<PreviewResponse>, AppError> {
    let raw = require_object(&payload)?;

    let response = match validate(raw) {
        Ok(resume) => PreviewResponse {
            valid: true,
            html: render_html(&resume),
            errors: None,
        },
        Err(errors) => {
            info!(violations = errors.len(), "partial preview");
            PreviewResponse {
                valid: false,
                html: render_partial_html(&payload),
                errors: Some(errors),
            }
        }
    };

    Ok(Json(response))
}

/// POST /api/v1/export
///
/// Returns the PDF as an attachment. Invalid data never reaches the renderer.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let raw = require_object(&payload)?;
    let resume = validate(raw).map_err(AppError::ExportBlocked)?;

    let meta = DocumentMeta {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
    };
    let export_id = meta.id;
    let page_config = state.page_config.clone();

    let pdf = tokio::task::spawn_blocking(move || render_pdf(&resume, &page_config, &meta))
        .await
        .map_err(|e| AppError::Render(format!("spawn_blocking failed in pdf export: {e}")))?;

    info!(%export_id, bytes = pdf.len(), "resume exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=resume.pdf"),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
