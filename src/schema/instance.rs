//! Typed field values and validated instances.
//!
//! A `ValidatedInstance` exists only as the output of a successful
//! validation pass. It exposes read access and a way to render itself back
//! into an input mapping; there is no mutation API.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A typed value held by a validated instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 string
    String(String),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// Nested validated record
    Record(ValidatedInstance),
    /// Ordered sequence of nested validated records
    List(Vec<ValidatedInstance>),
}

impl FieldValue {
    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an int value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric content of an int or float value.
    ///
    /// Used wherever a bound compares against "a number" regardless of the
    /// declared numeric type (range constraints, rule thresholds).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp content, if this is a timestamp value.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the nested record, if this is a record value.
    pub fn as_record(&self) -> Option<&ValidatedInstance> {
        match self {
            FieldValue::Record(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns the nested records, if this is a list value.
    pub fn as_list(&self) -> Option<&[ValidatedInstance]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Renders the value back into its input representation.
    ///
    /// Timestamps render as RFC 3339 strings, nested records as objects.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            FieldValue::Record(inner) => Value::Object(inner.to_input()),
            FieldValue::List(items) => {
                Value::Array(items.iter().map(|i| Value::Object(i.to_input())).collect())
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "'{}'", s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            FieldValue::Record(_) => write!(f, "record"),
            FieldValue::List(items) => write!(f, "list of {} records", items.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Immutable mapping from field name to typed value.
///
/// Guaranteed to have passed every field constraint and every model rule at
/// construction time; created only by the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInstance {
    values: BTreeMap<String, FieldValue>,
}

impl ValidatedInstance {
    pub(crate) fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns whether a field is present.
    ///
    /// Optional fields without a declared default are absent when the input
    /// omitted them.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns a string field's content.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Returns an int field's content.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    /// Returns a numeric field's content as a float.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Returns a bool field's content.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Returns a timestamp field's content.
    pub fn get_timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(FieldValue::as_timestamp)
    }

    /// Returns a nested record field.
    pub fn get_record(&self, name: &str) -> Option<&ValidatedInstance> {
        self.get(name).and_then(FieldValue::as_record)
    }

    /// Returns a list field's elements.
    pub fn get_list(&self, name: &str) -> Option<&[ValidatedInstance]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the instance holds no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Renders the instance back into an input mapping.
    ///
    /// Validating the result against the same schema succeeds again.
    pub fn to_input(&self) -> serde_json::Map<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}
