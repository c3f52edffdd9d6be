//! Record validator.
//!
//! Orchestration per call: every field descriptor runs in declaration order
//! (presence, then type coercion, then constraints), short-circuiting on the
//! first failure; only when all fields pass is the instance assembled and
//! the model rules evaluated, again in order and fail-fast. Each call is one
//! atomic pass with no retained state, and no partial instance is ever
//! exposed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult};
use super::instance::{FieldValue, ValidatedInstance};
use super::types::{FieldDescriptor, FieldType, RecordSchema};

/// Validator borrowing a read-only schema.
///
/// Validation is deterministic and does not mutate the schema or the input;
/// one schema may back any number of concurrent calls.
pub struct Validator<'a> {
    schema: &'a RecordSchema,
}

impl<'a> Validator<'a> {
    /// Creates a validator over the given schema.
    pub fn new(schema: &'a RecordSchema) -> Self {
        Self { schema }
    }

    /// Validates an input mapping, producing a validated instance or the
    /// first violation encountered.
    ///
    /// Undeclared input fields are ignored. JSON `null` counts as absent.
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationResult<ValidatedInstance> {
        let mut instance = ValidatedInstance::new();

        for descriptor in &self.schema.fields {
            if let Some(value) = self.validate_field(descriptor, input.get(&descriptor.name))? {
                instance.insert(descriptor.name.clone(), value);
            }
        }

        for rule in &self.schema.rules {
            if !rule.holds(&instance) {
                return Err(ValidationError::business_rule(&rule.message));
            }
        }

        Ok(instance)
    }

    /// Runs one field's pipeline: presence, coercion, constraints.
    ///
    /// Returns `Ok(None)` for an absent optional field without a default;
    /// such a field is left out of the instance entirely.
    fn validate_field(
        &self,
        descriptor: &FieldDescriptor,
        raw: Option<&Value>,
    ) -> ValidationResult<Option<FieldValue>> {
        let raw = match raw {
            Some(value) if !value.is_null() => value,
            _ => {
                if descriptor.required {
                    return Err(ValidationError::missing_field(&descriptor.name));
                }
                // no constraints run against a substituted default
                return Ok(descriptor.default.clone());
            }
        };

        let value = match &descriptor.field_type {
            FieldType::Record(nested) => self.validate_nested(descriptor, nested, raw)?,
            FieldType::List(nested) => self.validate_list(descriptor, nested, raw)?,
            primitive => {
                let value = coerce_primitive(raw, primitive).map_err(|actual| {
                    ValidationError::type_mismatch(&descriptor.name, primitive.type_name(), actual)
                })?;
                for constraint in &descriptor.constraints {
                    constraint
                        .check(&value)
                        .map_err(|reason| ValidationError::constraint(&descriptor.name, reason))?;
                }
                value
            }
        };

        Ok(Some(value))
    }

    /// Delegates a record field to the nested schema's validator.
    fn validate_nested(
        &self,
        descriptor: &FieldDescriptor,
        nested: &RecordSchema,
        raw: &Value,
    ) -> ValidationResult<FieldValue> {
        let object = raw.as_object().ok_or_else(|| {
            ValidationError::type_mismatch(&descriptor.name, "record", json_type_name(raw))
        })?;
        let instance = Validator::new(nested)
            .validate(object)
            .map_err(|err| err.nested_in(&descriptor.name))?;
        Ok(FieldValue::Record(instance))
    }

    /// Validates a bounded collection of nested records.
    ///
    /// The element count is checked against the field's own constraints
    /// before any element is validated; the first failing element is labeled
    /// with its index.
    fn validate_list(
        &self,
        descriptor: &FieldDescriptor,
        nested: &RecordSchema,
        raw: &Value,
    ) -> ValidationResult<FieldValue> {
        let array = raw.as_array().ok_or_else(|| {
            ValidationError::type_mismatch(&descriptor.name, "list", json_type_name(raw))
        })?;

        for constraint in &descriptor.constraints {
            constraint
                .check_count(array.len())
                .map_err(|reason| ValidationError::constraint(&descriptor.name, reason))?;
        }

        let mut items = Vec::with_capacity(array.len());
        for (index, element) in array.iter().enumerate() {
            let path = format!("{}[{}]", descriptor.name, index);
            let object = element
                .as_object()
                .ok_or_else(|| ValidationError::type_mismatch(&path, "record", json_type_name(element)))?;
            let instance = Validator::new(nested)
                .validate(object)
                .map_err(|err| err.nested_in(&path))?;
            items.push(instance);
        }

        Ok(FieldValue::List(items))
    }
}

impl RecordSchema {
    /// Convenience: validates an input mapping against this schema.
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationResult<ValidatedInstance> {
        Validator::new(self).validate(input)
    }
}

/// Interprets a raw value as the declared primitive type.
///
/// Returns a description of the actual value on failure. Int fields reject
/// floats; float fields accept ints; timestamps parse from strings.
fn coerce_primitive(value: &Value, field_type: &FieldType) -> Result<FieldValue, String> {
    match field_type {
        FieldType::String => value
            .as_str()
            .map(|s| FieldValue::String(s.to_string()))
            .ok_or_else(|| json_type_name(value).to_string()),
        FieldType::Int => value
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| json_type_name(value).to_string()),
        FieldType::Float => value
            .as_f64()
            .map(FieldValue::Float)
            .ok_or_else(|| json_type_name(value).to_string()),
        FieldType::Bool => value
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| json_type_name(value).to_string()),
        FieldType::Timestamp => {
            let text = value
                .as_str()
                .ok_or_else(|| json_type_name(value).to_string())?;
            parse_timestamp(text)
                .map(FieldValue::Timestamp)
                .ok_or_else(|| format!("malformed timestamp '{}'", text))
        }
        // record and list fields never reach primitive coercion
        FieldType::Record(_) | FieldType::List(_) => Err(json_type_name(value).to_string()),
    }
}

/// Accepts RFC 3339, naive datetime (`2024-01-15T10:00:00`), or bare date
/// (`2024-05-01`, midnight UTC).
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = text.parse::<NaiveDate>() {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
