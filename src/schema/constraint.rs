//! Constraint primitives: atomic checks on a single field value.
//!
//! Each primitive is pure and stateless; `check` returns the reason message
//! on violation, never mutating anything. Bounds are inclusive on both ends.

use crate::schema::instance::FieldValue;

/// An atomic rule checked against one field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Numeric range, inclusive on both ends. Applies to int and float fields.
    Range { min: f64, max: f64 },
    /// Inclusive character count for strings, element count for lists.
    Length { min: usize, max: usize },
    /// Exact-equality membership in a closed set.
    OneOf { allowed: Vec<FieldValue> },
}

impl Constraint {
    /// Checks a typed value, returning the violation reason on failure.
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            Constraint::Range { min, max } => match value.as_number() {
                Some(n) if n < *min || n > *max => Err(format!(
                    "value {} out of range [{}, {}]",
                    value, min, max
                )),
                Some(_) => Ok(()),
                None => Err(format!("range constraint on non-numeric value {}", value)),
            },
            Constraint::Length { min, max } => match value {
                FieldValue::String(s) => {
                    let count = s.chars().count();
                    if count < *min || count > *max {
                        Err(format!(
                            "length {} out of range [{}, {}]",
                            count, min, max
                        ))
                    } else {
                        Ok(())
                    }
                }
                FieldValue::List(items) => self.check_count(items.len()),
                other => Err(format!("length constraint on non-sized value {}", other)),
            },
            Constraint::OneOf { allowed } => {
                if allowed.contains(value) {
                    Ok(())
                } else {
                    let members: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                    Err(format!(
                        "value {} not one of [{}]",
                        value,
                        members.join(", ")
                    ))
                }
            }
        }
    }

    /// Checks a collection's element count.
    ///
    /// Only `Length` constrains counts; other variants pass. Runs before any
    /// element of the collection is validated.
    pub fn check_count(&self, count: usize) -> Result<(), String> {
        match self {
            Constraint::Length { min, max } if count < *min || count > *max => Err(format!(
                "element count {} out of range [{}, {}]",
                count, min, max
            )),
            _ => Ok(()),
        }
    }
}
