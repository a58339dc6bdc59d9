//! Contract Tests for Record Parsing
//!
//! Exercises every registered record through the dynamic registry API and
//! cross-checks the exported JSON Schemas with an independent validator.

use dento_schemas::{
    Appointment, Entity, EntityKind, FieldErrorKind, FieldType, ParseMode, Patient, Record,
    SchemaRegistry, Treatment, User,
};
use serde_json::{json, Value};

/// A canonical, fully populated payload for each record
fn sample(kind: EntityKind) -> Value {
    match kind {
        EntityKind::User => json!({
            "id": "u1", "username": "reception", "password": "$argon2id$v=19$abc",
            "role": "staff", "name": "Lina Haddad", "email": "lina@dento.clinic"
        }),
        EntityKind::Patient => json!({
            "id": "p1", "name": "Jane Roe", "dob": "1988-11-23", "gender": "F",
            "contact": "+966500000000", "email": "jane@example.com",
            "address": "12 King Fahd Rd", "medicalHistory": ["penicillin allergy", "bridge 2015"]
        }),
        EntityKind::Doctor => json!({
            "id": "d1", "name": "Dr. Sami", "specialization": "Periodontics",
            "contact": "ext. 204", "email": "sami@dento.clinic", "clinic": "c1"
        }),
        EntityKind::Appointment => json!({
            "id": "a1", "patient": "p1", "doctor": "d1", "date": "2024-05-01",
            "time": "10:00", "status": "confirmed", "notes": "first visit"
        }),
        EntityKind::Clinic => json!({
            "id": "c1", "name": "Dento Riyadh", "address": "Olaya St",
            "contact": "011 000 0000", "email": "riyadh@dento.clinic"
        }),
        EntityKind::Treatment => json!({
            "id": "t1", "patient": "p1", "doctor": "d1",
            "description": "Scaling and polishing", "date": "2024-05-01", "cost": 250.5
        }),
        EntityKind::Report => json!({
            "id": "r1", "patient": "p1", "doctor": "d1", "reportType": "panoramic",
            "content": "Impacted 48", "date": "2024-05-02"
        }),
        EntityKind::TreatmentPlan => json!({
            "id": "tp1", "patientId": "p1", "clinicId": "c1", "title": "Implant 36",
            "description": "Extraction, graft, implant", "status": "approved",
            "createdAt": "2024-04-20"
        }),
    }
}

fn without(mut value: Value, field: &str) -> Value {
    value.as_object_mut().unwrap().remove(field);
    value
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_canonical_payloads_round_trip() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        let input = sample(kind);
        let record = registry.validate(kind, &input).unwrap();
        assert_eq!(record.kind(), kind);
        assert_eq!(record.encode(), input, "{} did not round trip", kind);
    }
}

#[test]
fn test_minimal_payloads_round_trip() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        // Keep required and defaulted fields only
        let full = sample(kind);
        let mut minimal = serde_json::Map::new();
        for field in kind.fields() {
            if field.is_required() || field.default_value().is_some() {
                minimal.insert(field.name.to_string(), full[field.name].clone());
            }
        }
        let minimal = Value::Object(minimal);
        let record = registry.validate(kind, &minimal).unwrap();
        assert_eq!(record.encode(), minimal, "{} minimal form did not round trip", kind);
    }
}

#[test]
fn test_integer_cost_round_trips() {
    let registry = SchemaRegistry::new();
    let mut input = sample(EntityKind::Treatment);
    input["cost"] = json!(100);
    let encoded = registry.validate(EntityKind::Treatment, &input).unwrap().encode();
    assert_eq!(encoded, input);
    assert_eq!(encoded["cost"].to_string(), "100");
}

// =============================================================================
// Required Fields
// =============================================================================

#[test]
fn test_each_missing_required_field_is_named() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        for field in kind.fields().iter().filter(|f| f.is_required()) {
            let input = without(sample(kind), field.name);
            let err = registry.validate(kind, &input).unwrap_err();
            assert_eq!(err.entity, kind.name());
            assert_eq!(
                err.kind_of(field.name),
                Some(&FieldErrorKind::Missing),
                "{}.{} should be reported missing",
                kind,
                field.name
            );
            assert_eq!(err.len(), 1);
        }
    }
}

#[test]
fn test_null_required_field_is_missing() {
    let mut input = sample(EntityKind::Report);
    input["content"] = Value::Null;
    let err = SchemaRegistry::new().validate(EntityKind::Report, &input).unwrap_err();
    assert_eq!(err.kind_of("content"), Some(&FieldErrorKind::Missing));
}

#[test]
fn test_every_required_field_reported_at_once() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        let err = registry.validate(kind, &json!({})).unwrap_err();
        let required: Vec<&str> = kind
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name)
            .collect();
        let reported: Vec<&str> = err.fields().collect();
        assert_eq!(reported, required, "{}", kind);
    }
}

// =============================================================================
// Email Fields
// =============================================================================

#[test]
fn test_invalid_email_rejected_in_every_email_field() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        for field in kind.fields().iter().filter(|f| f.ty == FieldType::Email) {
            let mut input = sample(kind);
            input[field.name] = json!("not-an-email");
            let err = registry.validate(kind, &input).unwrap_err();
            assert_eq!(err.kind_of(field.name), Some(&FieldErrorKind::InvalidEmail), "{}", kind);

            input[field.name] = json!("a@b.com");
            assert!(registry.validate(kind, &input).is_ok(), "{}", kind);
        }
    }
}

#[test]
fn test_punycode_email_accepted() {
    let mut input = sample(EntityKind::Patient);
    input["email"] = json!("jane@clinic.xn--p1ai");
    let patient = Patient::parse_value(&input, ParseMode::Lenient).unwrap();
    assert_eq!(patient.email.as_deref(), Some("jane@clinic.xn--p1ai"));
}

#[test]
fn test_bob_with_bad_email() {
    let input = json!({"name": "Bob", "dob": "2020-01-01", "gender": "M", "email": "not-an-email"});
    let err = Patient::parse_value(&input, ParseMode::Lenient).unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), vec!["email"]);
}

// =============================================================================
// Date Fields
// =============================================================================

#[test]
fn test_timestamp_rejected_in_every_date_field() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        for field in kind.fields().iter().filter(|f| f.ty == FieldType::Date) {
            let mut input = sample(kind);
            input[field.name] = json!("2024-05-01T10:00:00Z");
            let err = registry.validate(kind, &input).unwrap_err();
            assert_eq!(err.kind_of(field.name), Some(&FieldErrorKind::InvalidDate), "{}", kind);
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_documented_defaults() {
    let patient = Patient::parse_value(
        &json!({"name": "Jane", "dob": "2020-01-01", "gender": "F"}),
        ParseMode::Lenient,
    )
    .unwrap();
    assert_eq!(patient.id, None);
    assert_eq!(patient.contact, None);
    assert_eq!(patient.email, None);
    assert_eq!(patient.address, None);
    assert_eq!(patient.medical_history, Vec::<String>::new());

    let appt = Appointment::parse_value(
        &json!({"patient": "p1", "doctor": "d1", "date": "2024-05-01", "time": "10:00"}),
        ParseMode::Lenient,
    )
    .unwrap();
    assert_eq!(appt.status, "scheduled");
    assert_eq!(appt.id, None);
    assert_eq!(appt.notes, None);
}

#[test]
fn test_null_defaulted_field_takes_default() {
    let appt = Appointment::parse_value(
        &json!({"patient": "p1", "doctor": "d1", "date": "2024-05-01", "time": "10:00", "status": null}),
        ParseMode::Lenient,
    )
    .unwrap();
    assert_eq!(appt.status, "scheduled");
}

// =============================================================================
// Unknown Fields
// =============================================================================

#[test]
fn test_unknown_fields_by_mode() {
    for kind in EntityKind::ALL {
        let mut input = sample(kind);
        input["legacyCode"] = json!("X-1");

        let lenient = SchemaRegistry::with_mode(ParseMode::Lenient).validate(kind, &input).unwrap();
        assert!(lenient.encode().get("legacyCode").is_none());

        let err = SchemaRegistry::with_mode(ParseMode::Strict).validate(kind, &input).unwrap_err();
        assert_eq!(err.kind_of("legacyCode"), Some(&FieldErrorKind::UnknownField));
        assert_eq!(err.len(), 1);
    }
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn test_ensure_id_assigns_once() {
    let mut user = User::parse_value(&without(sample(EntityKind::User), "id"), ParseMode::Lenient).unwrap();
    assert_eq!(user.id, None);
    let assigned = user.ensure_id().to_string();
    assert_eq!(assigned.len(), 36);
    assert_eq!(user.ensure_id(), assigned);

    let mut existing = Treatment::parse_value(&sample(EntityKind::Treatment), ParseMode::Lenient).unwrap();
    assert_eq!(existing.ensure_id(), "t1");
}

// =============================================================================
// Exported JSON Schema
// =============================================================================

#[test]
fn test_exported_schemas_accept_canonical_records() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL {
        let compiled = jsonschema::JSONSchema::compile(&kind.json_schema()).unwrap();
        let encoded = registry.validate(kind, &sample(kind)).unwrap().encode();
        assert!(compiled.is_valid(&encoded), "{} schema rejected its own record", kind);
    }
}

#[test]
fn test_exported_schemas_reject_missing_required() {
    for kind in EntityKind::ALL {
        let compiled = jsonschema::JSONSchema::compile(&kind.json_schema()).unwrap();
        for field in kind.fields().iter().filter(|f| f.is_required()) {
            let input = without(sample(kind), field.name);
            assert!(!compiled.is_valid(&input), "{}.{} should be required", kind, field.name);
        }
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_parse_from_many_threads() {
    let registry = SchemaRegistry::new();
    std::thread::scope(|scope| {
        for kind in EntityKind::ALL {
            let registry = &registry;
            scope.spawn(move || {
                for _ in 0..50 {
                    let record: Record = registry.validate(kind, &sample(kind)).unwrap();
                    assert_eq!(record.kind(), kind);
                }
            });
        }
    });
}
