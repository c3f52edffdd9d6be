//! Record validation subsystem
//!
//! # Design Principles
//!
//! - Field checks run in declaration order, model rules after all fields pass
//! - First violation wins: exactly one error per failed attempt
//! - Validation is deterministic and pure (no I/O, no logging, no mutation)
//! - Schemas are immutable once built and safe to share across threads
//! - Nested failures keep their kind and gain a dotted/indexed field path

mod constraint;
mod errors;
mod instance;
mod rules;
mod types;
mod validator;

pub use constraint::Constraint;
pub use errors::{ErrorKind, SchemaError, ValidationError, ValidationResult};
pub use instance::{FieldValue, ValidatedInstance};
pub use rules::{Condition, ElementPredicate, ModelRule, RuleCheck};
pub use types::{FieldDescriptor, FieldType, RecordSchema};
pub use validator::Validator;
