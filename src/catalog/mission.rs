//! Space mission schema with a nested crew list.

use std::fmt;
use std::sync::Arc;

use crate::schema::{
    Condition, Constraint, ElementPredicate, FieldDescriptor, FieldType, FieldValue, ModelRule,
    RecordSchema, RuleCheck,
};

/// Crew member rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Cadet,
    Officer,
    Lieutenant,
    Captain,
    Commander,
}

impl Rank {
    /// Every rank, lowest first.
    pub const ALL: [Rank; 5] = [
        Rank::Cadet,
        Rank::Officer,
        Rank::Lieutenant,
        Rank::Captain,
        Rank::Commander,
    ];

    /// Canonical string form used for membership and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Cadet => "cadet",
            Rank::Officer => "officer",
            Rank::Lieutenant => "lieutenant",
            Rank::Captain => "captain",
            Rank::Commander => "commander",
        }
    }

    /// Parses the canonical string form.
    pub fn parse(text: &str) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.as_str() == text)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the crew member schema nested inside a mission.
pub fn crew_member() -> RecordSchema {
    RecordSchema::new("crew_member")
        .field(
            FieldDescriptor::required("member_id", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 10 }),
        )
        .field(
            FieldDescriptor::required("name", FieldType::String)
                .with_constraint(Constraint::Length { min: 2, max: 50 }),
        )
        .field(
            FieldDescriptor::required("rank", FieldType::String).with_constraint(
                Constraint::OneOf {
                    allowed: Rank::ALL
                        .iter()
                        .map(|r| FieldValue::from(r.as_str()))
                        .collect(),
                },
            ),
        )
        .field(
            FieldDescriptor::required("age", FieldType::Int).with_constraint(Constraint::Range {
                min: 18.0,
                max: 80.0,
            }),
        )
        .field(
            FieldDescriptor::required("specialization", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 30 }),
        )
        .field(
            FieldDescriptor::required("years_experience", FieldType::Int).with_constraint(
                Constraint::Range {
                    min: 0.0,
                    max: 50.0,
                },
            ),
        )
        .field(FieldDescriptor::optional("is_active", FieldType::Bool).with_default(true))
}

/// Builds the space mission schema with its crew-aggregate rules.
pub fn mission() -> RecordSchema {
    let crew = Arc::new(crew_member());

    RecordSchema::new("space_mission")
        .field(
            FieldDescriptor::required("mission_id", FieldType::String)
                .with_constraint(Constraint::Length { min: 5, max: 15 }),
        )
        .field(
            FieldDescriptor::required("mission_name", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 100 }),
        )
        .field(
            FieldDescriptor::required("destination", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 50 }),
        )
        .field(FieldDescriptor::required("launch_date", FieldType::Timestamp))
        .field(
            FieldDescriptor::required("duration_days", FieldType::Int).with_constraint(
                Constraint::Range {
                    min: 1.0,
                    max: 3650.0,
                },
            ),
        )
        .field(
            FieldDescriptor::required("crew", FieldType::List(crew))
                .with_constraint(Constraint::Length { min: 1, max: 12 }),
        )
        .field(
            FieldDescriptor::optional("mission_status", FieldType::String)
                .with_default("planned"),
        )
        .field(
            FieldDescriptor::required("budget_millions", FieldType::Float).with_constraint(
                Constraint::Range {
                    min: 1.0,
                    max: 10000.0,
                },
            ),
        )
        .rule(ModelRule::new(
            "mission_id must start with 'M'",
            RuleCheck::StartsWith {
                field: "mission_id".into(),
                prefix: "M".into(),
            },
        ))
        .rule(ModelRule::new(
            "Mission must have at least one Commander or Captain",
            RuleCheck::Any {
                field: "crew".into(),
                predicate: ElementPredicate::FieldOneOf {
                    field: "rank".into(),
                    allowed: vec![
                        Rank::Captain.as_str().into(),
                        Rank::Commander.as_str().into(),
                    ],
                },
            },
        ))
        .rule(
            ModelRule::new(
                "Long missions need 50% experienced crew (5+ years)",
                RuleCheck::Proportion {
                    field: "crew".into(),
                    predicate: ElementPredicate::FieldAtLeast {
                        field: "years_experience".into(),
                        min: 5.0,
                    },
                    min_ratio: 0.5,
                },
            )
            .when(Condition::FieldAbove {
                field: "duration_days".into(),
                threshold: 365.0,
            }),
        )
        .rule(ModelRule::new(
            "All crew members must be active",
            RuleCheck::All {
                field: "crew".into(),
                predicate: ElementPredicate::FieldIsTrue {
                    field: "is_active".into(),
                },
            },
        ))
}
