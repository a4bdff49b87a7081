use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::validation::{validate, ErrorList};

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Option<ErrorList>,
    pub data: Option<Resume>,
}

/// Unwraps the top-level payload. Anything other than a JSON object is a
/// transport-level fault, not a validation result.
pub fn require_object(payload: &Value) -> Result<&Map<String, Value>, AppError> {
    payload.as_object().ok_or_else(|| {
        AppError::MalformedPayload(format!(
            "request body must be a JSON object, got {}",
            json_type_name(payload)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// POST /api/v1/validate
///
/// Always 200 for an object payload; `valid` tells the form whether to
/// highlight fields.
pub async fn handle_validate(
    Json(payload): Json<Value>,
) -> Result<Json<ValidationResponse>, AppError> {
    let raw = require_object(&payload)?;

    let response = match validate(raw) {
        Ok(resume) => {
            info!(
                experience = resume.experience.len(),
                skills = resume.skills.tokens().count(),
                "resume validated"
            );
            ValidationResponse {
                valid: true,
                errors: None,
                data: Some(resume),
            }
        }
        Err(errors) => {
            info!(
                violations = errors.len(),
                kinds = ?errors.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>(),
                "resume rejected"
            );
            ValidationResponse {
                valid: false,
                errors: Some(errors),
                data: None,
            }
        }
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::valid_resume;
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_payload() {
        let Json(response) = handle_validate(Json(valid_resume())).await.unwrap();
        assert!(response.valid);
        assert!(response.errors.is_none());
        let data = serde_json::to_value(response.data.unwrap()).unwrap();
        assert_eq!(data, valid_resume());
    }

    #[tokio::test]
    async fn test_invalid_payload_lists_errors() {
        let mut raw = valid_resume();
        raw["header"]["email"] = json!("invalid-email");
        raw["skills"]["skills"] = json!("Python JavaScript React");

        let Json(response) = handle_validate(Json(raw)).await.unwrap();
        assert!(!response.valid);
        assert!(response.data.is_none());
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["errors"][0]["field"], "header.email");
        assert_eq!(body["errors"][0]["type"], "pattern_violation");
        assert_eq!(body["errors"][1]["type"], "comma_format_violation");
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_non_object_payload_is_malformed() {
        for payload in [json!([1, 2]), json!("resume"), Value::Null] {
            let err = handle_validate(Json(payload)).await.unwrap_err();
            assert!(matches!(err, AppError::MalformedPayload(_)));
        }
    }
}
