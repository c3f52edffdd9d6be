//! Validation error types.
//!
//! Error kinds:
//! - MISSING_FIELD (required field absent)
//! - TYPE_MISMATCH (value present but wrong primitive type)
//! - CONSTRAINT_VIOLATION (right type, field constraint failed)
//! - BUSINESS_RULE_VIOLATION (all fields valid, cross-field rule failed)
//!
//! All four are terminal and reported synchronously as the `Err` result of a
//! validation pass; exactly one error is produced per failed attempt.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent from the input
    MissingField,
    /// Value present but not interpretable as the declared type
    TypeMismatch,
    /// Value present and typed, but a field constraint failed
    ConstraintViolation,
    /// Every field passed individually, a cross-field rule failed
    BusinessRuleViolation,
}

impl ErrorKind {
    /// Returns the stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorKind::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors in a schema definition itself (not in a record).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field name appears more than once in one schema
    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },
    /// A required field carries a default it could never substitute
    #[error("required field '{field}' must not declare a default")]
    RequiredWithDefault { field: String },
}

/// A single validation failure.
///
/// `field` holds the dotted/indexed path of the offending field
/// (e.g. `crew[0].age`) and is `None` for model-rule violations. Renders to
/// one line: `"<field>: <message>"` for field errors, the rule message
/// verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Offending field path; `None` for cross-field rule violations
    pub field: Option<String>,
    /// Failure classification
    pub kind: ErrorKind,
    /// Human-readable reason (field errors) or rule message (rule errors)
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(name) => write!(f, "{}: {}", name, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// A required field was absent.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            kind: ErrorKind::MissingField,
            message: "required field is missing".into(),
        }
    }

    /// A value could not be interpreted as the declared type.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self {
            field: Some(field.into()),
            kind: ErrorKind::TypeMismatch,
            message: format!("expected {}, got {}", expected, actual),
        }
    }

    /// A field constraint failed with the given reason.
    pub fn constraint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            kind: ErrorKind::ConstraintViolation,
            message: reason.into(),
        }
    }

    /// A cross-field model rule failed.
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self {
            field: None,
            kind: ErrorKind::BusinessRuleViolation,
            message: message.into(),
        }
    }

    /// Re-labels a failure that bubbled up from a nested record or element.
    ///
    /// Field errors gain a dotted prefix (`parent.child`); a nested rule
    /// violation, which carries no field, is labeled with the parent path
    /// itself. The original kind is preserved.
    pub fn nested_in(mut self, parent: &str) -> Self {
        self.field = Some(match self.field {
            Some(inner) => format!("{}.{}", parent, inner),
            None => parent.to_string(),
        });
        self
    }
}
