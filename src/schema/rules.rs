//! Cross-field model rules.
//!
//! Rules run only after every field has passed its own checks. They read the
//! assembled instance and never mutate it; a rule whose `when` condition does
//! not hold passes vacuously.

use crate::schema::instance::{FieldValue, ValidatedInstance};

/// A cross-field predicate with its canonical violation message.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRule {
    /// Message reported verbatim when the rule is violated
    pub message: String,
    /// Guard condition; the rule applies only when it holds
    pub when: Option<Condition>,
    /// The predicate the instance must satisfy
    pub check: RuleCheck,
}

impl ModelRule {
    /// Creates an unconditional rule.
    pub fn new(message: impl Into<String>, check: RuleCheck) -> Self {
        Self {
            message: message.into(),
            when: None,
            check,
        }
    }

    /// Guards the rule behind a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    /// Evaluates the rule against a fully field-valid instance.
    pub fn holds(&self, instance: &ValidatedInstance) -> bool {
        if let Some(condition) = &self.when {
            if !condition.holds(instance) {
                return true;
            }
        }
        self.check.holds(instance)
    }
}

/// Guard condition for conditional rules.
///
/// A condition over an absent field does not hold, so the guarded rule
/// passes vacuously.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals a specific value (exact equality)
    FieldEquals { field: String, value: FieldValue },
    /// Numeric field strictly exceeds a threshold
    FieldAbove { field: String, threshold: f64 },
}

impl Condition {
    fn holds(&self, instance: &ValidatedInstance) -> bool {
        match self {
            Condition::FieldEquals { field, value } => instance.get(field) == Some(value),
            Condition::FieldAbove { field, threshold } => instance
                .get(field)
                .and_then(FieldValue::as_number)
                .map_or(false, |n| n > *threshold),
        }
    }
}

/// The predicate body of a model rule.
///
/// A check over an absent field fails; `Present` is the check that makes a
/// conditionally-mandatory optional field explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleCheck {
    /// String field must start with a literal prefix
    StartsWith { field: String, prefix: String },
    /// Bool field must be true
    IsTrue { field: String },
    /// Numeric field must be at least `min`
    AtLeast { field: String, min: f64 },
    /// Field must hold a value
    Present { field: String },
    /// At least one element of a collection satisfies the predicate
    Any {
        field: String,
        predicate: ElementPredicate,
    },
    /// Every element of a collection satisfies the predicate
    All {
        field: String,
        predicate: ElementPredicate,
    },
    /// At least `min_ratio` of elements satisfy the predicate, by exact
    /// (non-truncating) division compared with `>=`
    Proportion {
        field: String,
        predicate: ElementPredicate,
        min_ratio: f64,
    },
}

impl RuleCheck {
    fn holds(&self, instance: &ValidatedInstance) -> bool {
        match self {
            RuleCheck::StartsWith { field, prefix } => instance
                .get_str(field)
                .map_or(false, |s| s.starts_with(prefix.as_str())),
            RuleCheck::IsTrue { field } => instance.get_bool(field) == Some(true),
            RuleCheck::AtLeast { field, min } => instance
                .get(field)
                .and_then(FieldValue::as_number)
                .map_or(false, |n| n >= *min),
            RuleCheck::Present { field } => instance.get(field).is_some(),
            RuleCheck::Any { field, predicate } => instance
                .get_list(field)
                .map_or(false, |items| items.iter().any(|e| predicate.holds(e))),
            RuleCheck::All { field, predicate } => instance
                .get_list(field)
                .map_or(false, |items| items.iter().all(|e| predicate.holds(e))),
            RuleCheck::Proportion {
                field,
                predicate,
                min_ratio,
            } => instance.get_list(field).map_or(false, |items| {
                if items.is_empty() {
                    return false;
                }
                let matching = items.iter().filter(|e| predicate.holds(e)).count();
                matching as f64 / items.len() as f64 >= *min_ratio
            }),
        }
    }
}

/// Per-element predicate over a collection of nested records.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementPredicate {
    /// Element field is one of a closed set of values
    FieldOneOf {
        field: String,
        allowed: Vec<FieldValue>,
    },
    /// Element numeric field is at least `min`
    FieldAtLeast { field: String, min: f64 },
    /// Element bool field is true
    FieldIsTrue { field: String },
}

impl ElementPredicate {
    /// Evaluates the predicate against one collection element.
    pub fn holds(&self, element: &ValidatedInstance) -> bool {
        match self {
            ElementPredicate::FieldOneOf { field, allowed } => element
                .get(field)
                .map_or(false, |value| allowed.contains(value)),
            ElementPredicate::FieldAtLeast { field, min } => element
                .get(field)
                .and_then(FieldValue::as_number)
                .map_or(false, |n| n >= *min),
            ElementPredicate::FieldIsTrue { field } => element.get_bool(field) == Some(true),
        }
    }
}
