use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Machine-readable tag for every rule the validator can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    TypeMismatch,
    LengthViolation,
    PatternViolation,
    WordCountViolation,
    EmojiViolation,
    CommaFormatViolation,
    MinCountViolation,
    EmptyElementViolation,
    UnknownField,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::LengthViolation => "length_violation",
            ViolationKind::PatternViolation => "pattern_violation",
            ViolationKind::WordCountViolation => "word_count_violation",
            ViolationKind::EmojiViolation => "emoji_violation",
            ViolationKind::CommaFormatViolation => "comma_format_violation",
            ViolationKind::MinCountViolation => "min_count_violation",
            ViolationKind::EmptyElementViolation => "empty_element_violation",
            ViolationKind::UnknownField => "unknown_field",
        }
    }
}

/// A rule failure before it is bound to a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One entry of the error list handed to the frontend form.
///
/// Serialized as `{field, message, type, input?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// Ordered list of every violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("résumé failed validation with {} violation(s)", .0.len())]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Field paths in report order.
    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_serializes_as_snake_case_tag() {
        for kind in [
            ViolationKind::MissingField,
            ViolationKind::CommaFormatViolation,
            ViolationKind::UnknownField,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_field_error_wire_shape() {
        let err = FieldError {
            field: "header.email".to_string(),
            message: "bad".to_string(),
            kind: ViolationKind::PatternViolation,
            input: Some(json!("nope")),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "field": "header.email",
                "message": "bad",
                "type": "pattern_violation",
                "input": "nope"
            })
        );
    }

    #[test]
    fn test_field_error_omits_absent_input() {
        let err = FieldError {
            field: "header".to_string(),
            message: "Field required".to_string(),
            kind: ViolationKind::MissingField,
            input: None,
        };
        let value = serde_json::to_value(&err).unwrap();
        assert!(value.get("input").is_none());
    }

    #[test]
    fn test_error_list_display_counts_entries() {
        let list = ErrorList::from(vec![FieldError {
            field: "skills.skills".to_string(),
            message: "x".to_string(),
            kind: ViolationKind::CommaFormatViolation,
            input: None,
        }]);
        assert_eq!(
            list.to_string(),
            "résumé failed validation with 1 violation(s)"
        );
        assert_eq!(serde_json::to_value(&list).unwrap().as_array().unwrap().len(), 1);
    }
}
