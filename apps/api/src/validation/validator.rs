//! The single-pass schema walker.
//!
//! Order of evaluation (and therefore of reported errors):
//! sections in schema order, fields in declaration order, list elements in
//! input order, then undeclared keys of the same object in key order.

use serde_json::{Map, Value};

use crate::models::resume::Resume;
use crate::validation::collector::{Collector, Expected, FieldPath};
use crate::validation::errors::{ErrorList, FieldError, Violation, ViolationKind};
use crate::validation::rules::Rule;
use crate::validation::schema::{
    declares_section, Cardinality, FieldKind, FieldSpec, RecordSpec, SectionSpec,
    RESUME_SECTIONS,
};

/// Validates a raw résumé mapping.
///
/// Returns the typed résumé only when every rule holds; otherwise returns
/// every violation found, in deterministic order.
pub fn validate(raw: &Map<String, Value>) -> Result<Resume, ErrorList> {
    let mut collector = Collector::default();
    let root = FieldPath::root();

    for section in RESUME_SECTIONS {
        check_section(section, raw.get(section.key), &root.key(section.key), &mut collector);
    }
    for (key, value) in raw {
        if !declares_section(key) {
            collector.unknown(&root.key(key), value);
        }
    }

    collector.finish()?;

    // The walk above guarantees the shape serde expects.
    serde_json::from_value(Value::Object(raw.clone())).map_err(|e| {
        ErrorList::from(vec![FieldError {
            field: String::new(),
            message: format!("Validated input could not be materialized: {e}"),
            kind: ViolationKind::TypeMismatch,
            input: None,
        }])
    })
}

fn check_section(
    section: &SectionSpec,
    value: Option<&Value>,
    path: &FieldPath,
    collector: &mut Collector,
) {
    match (section.cardinality, value) {
        (Cardinality::ZeroOrMore, None | Some(Value::Null)) => {}
        (_, None) => collector.missing(path),
        (Cardinality::One, Some(Value::Object(map))) => {
            check_record(section.record, map, path, collector);
        }
        (Cardinality::One, Some(other)) => {
            collector.type_mismatch(path, Expected::Object, other);
        }
        (cardinality, Some(Value::Array(items))) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = path.index(i);
                match item {
                    Value::Object(map) => {
                        check_record(section.record, map, &item_path, collector)
                    }
                    other => collector.type_mismatch(&item_path, Expected::Object, other),
                }
            }
            if cardinality == Cardinality::OneOrMore && items.is_empty() {
                collector.push(
                    path,
                    Violation::new(
                        ViolationKind::MinCountViolation,
                        format!("{} section cannot be empty", section.key),
                    ),
                    value,
                );
            }
        }
        (_, Some(other)) => collector.type_mismatch(path, Expected::List, other),
    }
}

fn check_record(
    record: &RecordSpec,
    map: &Map<String, Value>,
    path: &FieldPath,
    collector: &mut Collector,
) {
    for field in record.fields {
        check_field(field, map.get(field.name), &path.key(field.name), collector);
    }
    for (key, value) in map {
        if !record.declares(key) {
            collector.unknown(&path.key(key), value);
        }
    }
}

fn check_field(
    field: &FieldSpec,
    value: Option<&Value>,
    path: &FieldPath,
    collector: &mut Collector,
) {
    // Optional fields treat `null` as absent; a required `null` falls through
    // to the type check below.
    let Some(value) = value.filter(|v| field.required || !v.is_null()) else {
        if field.required {
            collector.missing(path);
        }
        return;
    };

    match field.kind {
        FieldKind::Text => match value {
            Value::String(s) => apply_rules(field.rules, s, value, path, collector),
            other => collector.type_mismatch(path, Expected::String, other),
        },
        FieldKind::TextList {
            item_rules,
            list_rules,
        } => {
            let Value::Array(items) = value else {
                return collector.type_mismatch(path, Expected::List, value);
            };

            let mut strings = Vec::with_capacity(items.len());
            let mut all_coerced = true;
            for (i, item) in items.iter().enumerate() {
                let item_path = path.index(i);
                match item {
                    Value::String(s) => {
                        apply_rules(item_rules, s, item, &item_path, collector);
                        strings.push(s.as_str());
                    }
                    other => {
                        all_coerced = false;
                        collector.type_mismatch(&item_path, Expected::String, other);
                    }
                }
            }

            if all_coerced {
                for rule in list_rules {
                    if let Err(violation) = rule.check(&strings) {
                        collector.push(path, violation, Some(value));
                    }
                }
            }
        }
    }
}

fn apply_rules(
    rules: &[Rule],
    text: &str,
    raw: &Value,
    path: &FieldPath,
    collector: &mut Collector,
) {
    for rule in rules {
        if let Err(violation) = rule.check(text) {
            collector.push(path, violation, Some(raw));
        }
    }
}
