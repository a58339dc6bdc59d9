//! Entity kinds, JSON Schema rendering and the dynamic record wrapper

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::checksum::Checksum;
use crate::entities::{Appointment, Clinic, Doctor, Patient, Report, Treatment, TreatmentPlan, User};
use crate::entity::Entity;
use crate::error::{SchemaError, ValidationError};
use crate::field::{FieldSpec, FieldType, ParseMode};

/// JSON Schema dialect of exported schemas
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// The closed set of records known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Patient,
    Doctor,
    Appointment,
    Clinic,
    Treatment,
    Report,
    TreatmentPlan,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::User,
        EntityKind::Patient,
        EntityKind::Doctor,
        EntityKind::Appointment,
        EntityKind::Clinic,
        EntityKind::Treatment,
        EntityKind::Report,
        EntityKind::TreatmentPlan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::User => User::NAME,
            EntityKind::Patient => Patient::NAME,
            EntityKind::Doctor => Doctor::NAME,
            EntityKind::Appointment => Appointment::NAME,
            EntityKind::Clinic => Clinic::NAME,
            EntityKind::Treatment => Treatment::NAME,
            EntityKind::Report => Report::NAME,
            EntityKind::TreatmentPlan => TreatmentPlan::NAME,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::User => User::FIELDS,
            EntityKind::Patient => Patient::FIELDS,
            EntityKind::Doctor => Doctor::FIELDS,
            EntityKind::Appointment => Appointment::FIELDS,
            EntityKind::Clinic => Clinic::FIELDS,
            EntityKind::Treatment => Treatment::FIELDS,
            EntityKind::Report => Report::FIELDS,
            EntityKind::TreatmentPlan => TreatmentPlan::FIELDS,
        }
    }

    /// File name of the exported schema, e.g. `Patient.schema.json`
    pub fn filename(&self) -> String {
        format!("{}.schema.json", self.name())
    }

    /// Render the record as a draft-07 JSON Schema document
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.fields() {
            properties.insert(field.name.to_string(), field_schema(field));
            if field.is_required() {
                required.push(Value::String(field.name.to_string()));
            }
        }

        json!({
            "$schema": JSON_SCHEMA_DRAFT,
            "title": self.name(),
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": true,
        })
    }

    pub fn checksum(&self) -> Checksum {
        Checksum::from_json(&self.json_schema())
    }

    /// Parse a payload into the matching record type
    pub fn parse(&self, value: &Value, mode: ParseMode) -> Result<Record, ValidationError> {
        Ok(match self {
            EntityKind::User => Record::User(User::parse_value(value, mode)?),
            EntityKind::Patient => Record::Patient(Patient::parse_value(value, mode)?),
            EntityKind::Doctor => Record::Doctor(Doctor::parse_value(value, mode)?),
            EntityKind::Appointment => Record::Appointment(Appointment::parse_value(value, mode)?),
            EntityKind::Clinic => Record::Clinic(Clinic::parse_value(value, mode)?),
            EntityKind::Treatment => Record::Treatment(Treatment::parse_value(value, mode)?),
            EntityKind::Report => Record::Report(Report::parse_value(value, mode)?),
            EntityKind::TreatmentPlan => Record::TreatmentPlan(TreatmentPlan::parse_value(value, mode)?),
        })
    }
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = Map::new();
    match field.ty {
        FieldType::StringList => {
            schema.insert("type".into(), json!("array"));
            schema.insert("items".into(), json!({ "type": "string" }));
        }
        ty => {
            schema.insert("type".into(), json!(ty.json_type()));
            if let Some(format) = ty.format() {
                schema.insert("format".into(), json!(format));
            }
        }
    }
    if let Some(default) = field.default_value() {
        schema.insert("default".into(), default);
    }
    Value::Object(schema)
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = SchemaError;

    /// Case-insensitive; `treatment_plan` and `treatment-plan` are accepted too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|k| k.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| SchemaError::UnknownEntity(s.to_string()))
    }
}

/// A parsed record of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    User(User),
    Patient(Patient),
    Doctor(Doctor),
    Appointment(Appointment),
    Clinic(Clinic),
    Treatment(Treatment),
    Report(Report),
    TreatmentPlan(TreatmentPlan),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::User(_) => EntityKind::User,
            Record::Patient(_) => EntityKind::Patient,
            Record::Doctor(_) => EntityKind::Doctor,
            Record::Appointment(_) => EntityKind::Appointment,
            Record::Clinic(_) => EntityKind::Clinic,
            Record::Treatment(_) => EntityKind::Treatment,
            Record::Report(_) => EntityKind::Report,
            Record::TreatmentPlan(_) => EntityKind::TreatmentPlan,
        }
    }

    pub fn encode(&self) -> Value {
        match self {
            Record::User(r) => r.encode(),
            Record::Patient(r) => r.encode(),
            Record::Doctor(r) => r.encode(),
            Record::Appointment(r) => r.encode(),
            Record::Clinic(r) => r.encode(),
            Record::Treatment(r) => r.encode(),
            Record::Report(r) => r.encode(),
            Record::TreatmentPlan(r) => r.encode(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Record::User(r) => r.id(),
            Record::Patient(r) => r.id(),
            Record::Doctor(r) => r.id(),
            Record::Appointment(r) => r.id(),
            Record::Clinic(r) => r.id(),
            Record::Treatment(r) => r.id(),
            Record::Report(r) => r.id(),
            Record::TreatmentPlan(r) => r.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Patient".parse::<EntityKind>().unwrap(), EntityKind::Patient);
        assert_eq!("appointment".parse::<EntityKind>().unwrap(), EntityKind::Appointment);
        assert_eq!("treatment_plan".parse::<EntityKind>().unwrap(), EntityKind::TreatmentPlan);
        assert!(matches!(
            "Invoice".parse::<EntityKind>(),
            Err(SchemaError::UnknownEntity(name)) if name == "Invoice"
        ));
    }

    #[test]
    fn test_display_round_trips_name() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_patient_json_schema() {
        let schema = EntityKind::Patient.json_schema();
        assert_eq!(schema["title"], "Patient");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name", "dob", "gender"]));
        assert_eq!(schema["properties"]["dob"]["format"], "date");
        assert_eq!(schema["properties"]["email"]["format"], "email");
        assert_eq!(schema["properties"]["medicalHistory"]["type"], "array");
        assert_eq!(schema["properties"]["medicalHistory"]["items"]["type"], "string");
        assert_eq!(schema["properties"]["medicalHistory"]["default"], json!([]));
    }

    #[test]
    fn test_appointment_status_default_in_schema() {
        let schema = EntityKind::Appointment.json_schema();
        assert_eq!(schema["properties"]["status"]["default"], "scheduled");
        let required = schema["required"].as_array().unwrap();
        assert!(!required.contains(&json!("status")));
        assert!(!required.contains(&json!("id")));
    }

    #[test]
    fn test_every_kind_declares_optional_id() {
        for kind in EntityKind::ALL {
            let id = kind.fields().iter().find(|f| f.name == "id").unwrap();
            assert!(!id.is_required(), "{} id must be optional", kind);
        }
    }

    #[test]
    fn test_checksums_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for kind in EntityKind::ALL {
            assert!(seen.insert(kind.checksum()), "duplicate checksum for {}", kind);
        }
    }

    #[test]
    fn test_dynamic_parse() {
        let record = EntityKind::Clinic
            .parse(&json!({"id": "c1", "name": "North"}), ParseMode::Lenient)
            .unwrap();
        assert_eq!(record.kind(), EntityKind::Clinic);
        assert_eq!(record.id(), Some("c1"));
        assert_eq!(record.encode(), json!({"id": "c1", "name": "North"}));
    }

    #[test]
    fn test_dynamic_parse_rejects_non_object() {
        let err = EntityKind::Report.parse(&json!([1, 2]), ParseMode::Lenient).unwrap_err();
        assert_eq!(err.entity, "Report");
        assert_eq!(err.kind_of(""), Some(&crate::error::FieldErrorKind::NotAnObject));
    }
}
