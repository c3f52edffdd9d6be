//! Space station record schema.

use crate::schema::{Constraint, FieldDescriptor, FieldType, RecordSchema};

/// Builds the space station schema: field constraints only, no model rules.
pub fn station() -> RecordSchema {
    RecordSchema::new("space_station")
        .field(
            FieldDescriptor::required("station_id", FieldType::String)
                .with_constraint(Constraint::Length { min: 3, max: 10 }),
        )
        .field(
            FieldDescriptor::required("name", FieldType::String)
                .with_constraint(Constraint::Length { min: 1, max: 50 }),
        )
        .field(
            FieldDescriptor::required("crew_size", FieldType::Int)
                .with_constraint(Constraint::Range {
                    min: 1.0,
                    max: 20.0,
                }),
        )
        .field(
            FieldDescriptor::required("power_level", FieldType::Float).with_constraint(
                Constraint::Range {
                    min: 0.0,
                    max: 100.0,
                },
            ),
        )
        .field(
            FieldDescriptor::required("oxygen_level", FieldType::Float).with_constraint(
                Constraint::Range {
                    min: 0.0,
                    max: 100.0,
                },
            ),
        )
        .field(FieldDescriptor::required("last_maintenance", FieldType::Timestamp))
        .field(FieldDescriptor::optional("is_operational", FieldType::Bool).with_default(true))
        .field(
            FieldDescriptor::optional("notes", FieldType::String)
                .with_constraint(Constraint::Length { min: 0, max: 200 }),
        )
}
