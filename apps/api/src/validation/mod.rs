// Résumé validation engine.
// A static schema table (schema.rs) is walked once per request (validator.rs);
// every rule failure is accumulated (collector.rs) rather than returned early.

pub mod collector;
pub mod emoji;
pub mod errors;
pub mod handlers;
pub mod rules;
pub mod schema;
pub mod validator;

// Re-export the public API consumed by renderers and handlers.
pub use errors::{ErrorList, FieldError, ViolationKind};
pub use validator::validate;
