//! Validation Invariant Tests
//!
//! Tests for the engine's externally observable properties:
//! - Validation is deterministic
//! - A successful instance re-validates from its own values (idempotence)
//! - Field checks strictly precede model rules (fail-fast ordering)
//! - Range bounds are inclusive on both ends
//! - The station / contact / mission scenarios behave as specified

use serde_json::{json, Map, Value};
use strictrec::catalog::{contact, mission, station, Rank};
use strictrec::schema::{
    Constraint, ErrorKind, FieldDescriptor, FieldType, RecordSchema, Validator,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn as_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("fixture must be an object")
}

fn valid_station() -> Map<String, Value> {
    as_map(json!({
        "station_id": "SS-001",
        "name": "ISS",
        "crew_size": 6,
        "power_level": 85.5,
        "oxygen_level": 90.0,
        "last_maintenance": "2024-05-01T00:00:00",
        "is_operational": true
    }))
}

fn crew_member(rank: Rank, years: i64) -> Value {
    json!({
        "member_id": "CM001",
        "name": "Crew Member",
        "rank": rank.as_str(),
        "age": 30,
        "specialization": "Navigation",
        "years_experience": years
    })
}

// =============================================================================
// Determinism
// =============================================================================

/// Identical invalid input yields identical error content, every time.
#[test]
fn test_invalid_input_fails_identically() {
    let schema = station();
    let mut input = valid_station();
    input.insert("crew_size".into(), json!(99));

    let first = schema.validate(&input).unwrap_err();
    for _ in 0..100 {
        let again = schema.validate(&input).unwrap_err();
        assert_eq!(again, first);
        assert_eq!(again.to_string(), first.to_string());
    }
}

/// Valid input validates the same way every time.
#[test]
fn test_valid_input_passes_consistently() {
    let schema = station();
    let input = valid_station();

    let first = schema.validate(&input).unwrap();
    for _ in 0..100 {
        assert_eq!(schema.validate(&input).unwrap(), first);
    }
}

// =============================================================================
// Idempotence of Success
// =============================================================================

/// A validated instance's own values, fed back as input, validate again.
#[test]
fn test_success_is_idempotent() {
    let schema = station();
    let instance = schema.validate(&valid_station()).unwrap();

    let replay = schema.validate(&instance.to_input()).unwrap();
    assert_eq!(replay, instance);
}

/// Idempotence holds through nesting and defaults.
#[test]
fn test_success_is_idempotent_for_nested_records() {
    let schema = mission();
    let input = as_map(json!({
        "mission_id": "M2024_MARS",
        "mission_name": "Mars Colony Establishment",
        "destination": "Mars",
        "launch_date": "2024-06-01T00:00:00",
        "duration_days": 900,
        "budget_millions": 2500.0,
        "crew": [
            crew_member(Rank::Commander, 15),
            crew_member(Rank::Officer, 6)
        ]
    }));

    let instance = schema.validate(&input).unwrap();
    let replay = schema.validate(&instance.to_input()).unwrap();
    assert_eq!(replay, instance);
}

// =============================================================================
// Fail-Fast Ordering
// =============================================================================

/// Input violating both a field constraint and a model rule reports the
/// field-level error: field checks strictly precede rule checks.
#[test]
fn test_field_error_beats_rule_error() {
    let schema = contact();
    let input = as_map(json!({
        "contact_id": "XY123",          // violates the 'AC' prefix rule
        "timestamp": "2024-01-15T10:00:00",
        "location": "Dark Side of the Moon",
        "contact_type": "radio",
        "signal_strength": 99.0,        // violates the 0..=10 range
        "duration_minutes": 30,
        "witness_count": 5
    }));

    let err = schema.validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    assert_eq!(err.field.as_deref(), Some("signal_strength"));
}

/// Exactly one error surfaces even when several fields are invalid, and it
/// belongs to the first declared offender.
#[test]
fn test_first_declared_field_wins() {
    let schema = station();
    let mut input = valid_station();
    input.insert("crew_size".into(), json!(99));
    input.insert("power_level".into(), json!(-5.0));

    let err = schema.validate(&input).unwrap_err();
    assert_eq!(err.field.as_deref(), Some("crew_size"));
}

/// Model rules run in declaration order: the prefix rule is declared before
/// the leadership rule, so it is the one reported.
#[test]
fn test_rules_run_in_declaration_order() {
    let schema = mission();
    let input = as_map(json!({
        "mission_id": "X2024_BAD",      // violates the prefix rule
        "mission_name": "Failed Mission",
        "destination": "Moon",
        "launch_date": "2024-06-01T00:00:00",
        "duration_days": 30,
        "budget_millions": 100.0,
        "crew": [crew_member(Rank::Cadet, 1)]  // violates the leadership rule
    }));

    let err = schema.validate(&input).unwrap_err();
    assert_eq!(err.to_string(), "mission_id must start with 'M'");
}

// =============================================================================
// Boundary Inclusivity
// =============================================================================

/// A Range{0.0, 100.0} field accepts exactly 0.0 and 100.0 and rejects
/// values just outside either bound.
#[test]
fn test_range_bounds_are_inclusive() {
    let schema = RecordSchema::new("gauge").field(
        FieldDescriptor::required("level", FieldType::Float).with_constraint(Constraint::Range {
            min: 0.0,
            max: 100.0,
        }),
    );
    let validator = Validator::new(&schema);

    for accepted in [0.0, 100.0] {
        let input = as_map(json!({ "level": accepted }));
        assert!(validator.validate(&input).is_ok(), "rejected {}", accepted);
    }
    for rejected in [-0.0001, 100.0001] {
        let input = as_map(json!({ "level": rejected }));
        let err = validator.validate(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation, "accepted {}", rejected);
    }
}

// =============================================================================
// Scenario: Space Station
// =============================================================================

/// The canonical valid station record passes.
#[test]
fn test_station_valid_scenario() {
    let instance = station().validate(&valid_station()).unwrap();
    assert_eq!(instance.get_str("station_id"), Some("SS-001"));
    assert_eq!(instance.get_str("name"), Some("ISS"));
    assert_eq!(instance.get_i64("crew_size"), Some(6));
    assert_eq!(instance.get_f64("power_level"), Some(85.5));
    assert_eq!(instance.get_f64("oxygen_level"), Some(90.0));
    assert_eq!(instance.get_bool("is_operational"), Some(true));
    assert!(instance.get_timestamp("last_maintenance").is_some());
}

/// Same record with crew_size 99 fails the <=20 bound.
#[test]
fn test_station_invalid_scenario() {
    let mut input = valid_station();
    input.insert("crew_size".into(), json!(99));

    let err = station().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    assert_eq!(err.field.as_deref(), Some("crew_size"));
}

// =============================================================================
// Scenario: Alien Contact
// =============================================================================

/// A telepathic contact with one witness violates the conditional rule.
#[test]
fn test_contact_conditional_rule_scenario() {
    let input = as_map(json!({
        "contact_id": "AC123",
        "timestamp": "2024-01-15T10:00:00",
        "location": "Dark Side of the Moon",
        "contact_type": "telepathic",
        "signal_strength": 5.0,
        "duration_minutes": 30,
        "witness_count": 1
    }));

    let err = contact().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BusinessRuleViolation);
    assert!(err.field.is_none());
    assert_eq!(
        err.to_string(),
        "Telepathic contact requires at least 3 witnesses"
    );
}

/// "AC123" satisfies the literal prefix; "XY123" does not.
#[test]
fn test_contact_prefix_rule_scenario() {
    let base = as_map(json!({
        "contact_id": "AC123",
        "timestamp": "2024-01-15T10:00:00",
        "location": "Area 51, Nevada",
        "contact_type": "visual",
        "signal_strength": 5.0,
        "duration_minutes": 30,
        "witness_count": 5
    }));
    assert!(contact().validate(&base).is_ok());

    let mut bad = base;
    bad.insert("contact_id".into(), json!("XY123"));
    let err = contact().validate(&bad).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BusinessRuleViolation);
    assert_eq!(err.to_string(), "contact_id must start with 'AC'");
}

// =============================================================================
// Scenario: Space Mission
// =============================================================================

fn mission_input(duration_days: i64, crew: Vec<Value>) -> Map<String, Value> {
    as_map(json!({
        "mission_id": "M2024_TEST",
        "mission_name": "Test Mission",
        "destination": "Moon",
        "launch_date": "2024-06-01T00:00:00",
        "duration_days": duration_days,
        "budget_millions": 100.0,
        "crew": crew
    }))
}

/// No commander or captain aboard violates the aggregate rule.
#[test]
fn test_mission_leadership_scenario() {
    let input = mission_input(30, vec![crew_member(Rank::Cadet, 1)]);

    let err = mission().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BusinessRuleViolation);
    assert_eq!(
        err.to_string(),
        "Mission must have at least one Commander or Captain"
    );
}

/// 1 of 3 experienced members on a 900-day mission misses the 50% bar.
#[test]
fn test_mission_experience_proportion_scenario() {
    let input = mission_input(
        900,
        vec![
            crew_member(Rank::Commander, 15),
            crew_member(Rank::Cadet, 1),
            crew_member(Rank::Cadet, 2),
        ],
    );

    let err = mission().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BusinessRuleViolation);
    assert_eq!(
        err.to_string(),
        "Long missions need 50% experienced crew (5+ years)"
    );
}

/// Exactly 50% experienced passes: the proportion uses exact division
/// compared with >=.
#[test]
fn test_mission_experience_exact_half_passes() {
    let input = mission_input(
        900,
        vec![
            crew_member(Rank::Commander, 15),
            crew_member(Rank::Cadet, 1),
        ],
    );

    assert!(mission().validate(&input).is_ok());
}

// =============================================================================
// Nested Path Labeling
// =============================================================================

/// A failure inside a crew element keeps its kind and gains the indexed,
/// dotted path.
#[test]
fn test_element_failure_has_indexed_path() {
    let mut bad_member = crew_member(Rank::Commander, 15);
    bad_member["age"] = json!(15);
    let input = mission_input(30, vec![crew_member(Rank::Captain, 10), bad_member]);

    let err = mission().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    assert_eq!(err.field.as_deref(), Some("crew[1].age"));
}

/// A missing field inside an element reports MissingField at the element path.
#[test]
fn test_element_missing_field_path() {
    let mut bad_member = crew_member(Rank::Commander, 15);
    bad_member.as_object_mut().unwrap().remove("rank");
    let input = mission_input(30, vec![bad_member]);

    let err = mission().validate(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingField);
    assert_eq!(err.field.as_deref(), Some("crew[0].rank"));
}
