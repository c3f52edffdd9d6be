//! Alien contact log schema.

use std::fmt;

use crate::schema::{
    Condition, Constraint, FieldDescriptor, FieldType, FieldValue, ModelRule, RecordSchema,
    RuleCheck,
};

/// How a contact event was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Radio,
    Visual,
    Physical,
    Telepathic,
}

impl ContactType {
    /// Every contact type, in canonical order.
    pub const ALL: [ContactType; 4] = [
        ContactType::Radio,
        ContactType::Visual,
        ContactType::Physical,
        ContactType::Telepathic,
    ];

    /// Canonical string form used for membership and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Radio => "radio",
            ContactType::Visual => "visual",
            ContactType::Physical => "physical",
            ContactType::Telepathic => "telepathic",
        }
    }

    /// Parses the canonical string form.
    pub fn parse(text: &str) -> Option<ContactType> {
        ContactType::ALL.iter().copied().find(|t| t.as_str() == text)
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the alien contact schema with its conditional rules.
pub fn contact() -> RecordSchema {
    RecordSchema::new("alien_contact")
        .field(
            FieldDescriptor::required("contact_id", FieldType::String)
                .with_constraint(Constraint::Length { min: 5, max: 15 }),
        )
        .field(FieldDescriptor::required("timestamp", FieldType::Timestamp))
        .field(
            FieldDescriptor::required("location", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 100 }),
        )
        .field(
            FieldDescriptor::required("contact_type", FieldType::String).with_constraint(
                Constraint::OneOf {
                    allowed: ContactType::ALL
                        .iter()
                        .map(|t| FieldValue::from(t.as_str()))
                        .collect(),
                },
            ),
        )
        .field(
            FieldDescriptor::required("signal_strength", FieldType::Float).with_constraint(
                Constraint::Range {
                    min: 0.0,
                    max: 10.0,
                },
            ),
        )
        .field(
            FieldDescriptor::required("duration_minutes", FieldType::Int).with_constraint(
                Constraint::Range {
                    min: 1.0,
                    max: 1440.0,
                },
            ),
        )
        .field(
            FieldDescriptor::required("witness_count", FieldType::Int).with_constraint(
                Constraint::Range {
                    min: 1.0,
                    max: 100.0,
                },
            ),
        )
        .field(
            FieldDescriptor::optional("message_received", FieldType::String)
                .with_constraint(Constraint::Length { min: 0, max: 500 }),
        )
        .field(FieldDescriptor::optional("is_verified", FieldType::Bool).with_default(false))
        .rule(ModelRule::new(
            "contact_id must start with 'AC'",
            RuleCheck::StartsWith {
                field: "contact_id".into(),
                prefix: "AC".into(),
            },
        ))
        .rule(
            ModelRule::new(
                "Physical contact reports must be verified",
                RuleCheck::IsTrue {
                    field: "is_verified".into(),
                },
            )
            .when(Condition::FieldEquals {
                field: "contact_type".into(),
                value: ContactType::Physical.as_str().into(),
            }),
        )
        .rule(
            ModelRule::new(
                "Telepathic contact requires at least 3 witnesses",
                RuleCheck::AtLeast {
                    field: "witness_count".into(),
                    min: 3.0,
                },
            )
            .when(Condition::FieldEquals {
                field: "contact_type".into(),
                value: ContactType::Telepathic.as_str().into(),
            }),
        )
        .rule(
            ModelRule::new(
                "Strong signals must include a received message",
                RuleCheck::Present {
                    field: "message_received".into(),
                },
            )
            .when(Condition::FieldAbove {
                field: "signal_strength".into(),
                threshold: 7.0,
            }),
        )
}
