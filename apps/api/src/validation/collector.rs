//! Error accumulation for a single validation pass.
//!
//! Rules never return early through `?`: every failure is pushed here against
//! the path it was found at, and the walker keeps going.

use std::fmt;

use serde_json::Value;

use crate::validation::errors::{ErrorList, FieldError, Violation, ViolationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Dotted, indexed location of a value inside the raw payload,
/// e.g. `experience.0.responsibilities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

/// Shape a field was expected to coerce into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    List,
    Object,
}

impl Expected {
    fn noun(&self) -> &'static str {
        match self {
            Expected::String => "string",
            Expected::List => "list",
            Expected::Object => "object",
        }
    }
}

#[derive(Debug, Default)]
pub struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    pub fn push(&mut self, path: &FieldPath, violation: Violation, input: Option<&Value>) {
        self.errors.push(FieldError {
            field: path.to_string(),
            message: violation.message,
            kind: violation.kind,
            input: input.cloned(),
        });
    }

    pub fn missing(&mut self, path: &FieldPath) {
        self.push(
            path,
            Violation::new(ViolationKind::MissingField, "Field required"),
            None,
        );
    }

    pub fn type_mismatch(&mut self, path: &FieldPath, expected: Expected, input: &Value) {
        self.push(
            path,
            Violation::new(
                ViolationKind::TypeMismatch,
                format!("Input should be a valid {}", expected.noun()),
            ),
            Some(input),
        );
    }

    pub fn unknown(&mut self, path: &FieldPath, input: &Value) {
        self.push(
            path,
            Violation::new(ViolationKind::UnknownField, "Extra inputs are not permitted"),
            Some(input),
        );
    }

    /// Ok when nothing was collected, otherwise the full ordered list.
    pub fn finish(self) -> Result<(), ErrorList> {
        let errors = ErrorList::from(self.errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
