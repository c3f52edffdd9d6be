//! Schema type definitions.
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - timestamp: UTC timestamp, supplied as a string
//! - record: nested record with its own schema
//! - list: bounded ordered sequence of nested records

use std::sync::Arc;

use crate::schema::constraint::Constraint;
use crate::schema::errors::SchemaError;
use crate::schema::instance::FieldValue;
use crate::schema::rules::ModelRule;

/// Declared type of a field.
///
/// `Record` and `List` reference their nested schema through an `Arc`; the
/// nested schema is shared, not owned, and may back several fields or
/// schemas at once.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer (floats are rejected)
    Int,
    /// 64-bit floating point (ints are accepted)
    Float,
    /// Boolean
    Bool,
    /// UTC timestamp parsed from an RFC 3339, naive datetime, or date string
    Timestamp,
    /// Nested record validated against the referenced schema
    Record(Arc<RecordSchema>),
    /// Ordered sequence of records validated against the referenced schema
    List(Arc<RecordSchema>),
}

impl FieldType {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Timestamp => "timestamp",
            FieldType::Record(_) => "record",
            FieldType::List(_) => "list",
        }
    }
}

/// Schema entry binding a name, a type, and ordered constraints.
///
/// Presence is checked before anything else: a required field with no
/// supplied value is always an error, and an absent optional field either
/// takes its default (with no constraints run against it) or stays absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within its schema
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
    /// Constraints, evaluated in declaration order
    pub constraints: Vec<Constraint>,
    /// Whether the field must be present in the input
    pub required: bool,
    /// Value substituted when an optional field is absent
    pub default: Option<FieldValue>,
}

impl FieldDescriptor {
    /// Creates a required field.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            constraints: Vec::new(),
            required: true,
            default: None,
        }
    }

    /// Creates an optional field with no default (absence is tolerated).
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            constraints: Vec::new(),
            required: false,
            default: None,
        }
    }

    /// Declares the default substituted when the field is absent.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Appends a constraint; constraints run in the order declared.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Ordered field descriptors plus ordered cross-field rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Schema name, used for diagnostics only
    pub name: String,
    /// Field descriptors in declaration order; names are unique
    pub fields: Vec<FieldDescriptor>,
    /// Model rules in declaration order
    pub rules: Vec<ModelRule>,
}

impl RecordSchema {
    /// Creates an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Appends a field descriptor.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Appends a model rule.
    pub fn rule(mut self, rule: ModelRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Looks up a descriptor by field name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|d| d.name == name)
    }

    /// Validates the schema structure itself (not a record).
    ///
    /// Field names must be unique and a required field must not carry a
    /// default (it can never be substituted).
    pub fn validate_structure(&self) -> Result<(), SchemaError> {
        for (i, descriptor) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|d| d.name == descriptor.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field: descriptor.name.clone(),
                });
            }
            if descriptor.required && descriptor.default.is_some() {
                return Err(SchemaError::RequiredWithDefault {
                    field: descriptor.name.clone(),
                });
            }
        }
        Ok(())
    }
}
