use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldDefault, FieldReader, FieldSpec, FieldType};

pub const DEFAULT_STATUS: &str = "pending";

/// A proposed course of treatment for a patient at a clinic
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient_id: String,
    pub clinic_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    /// Creation date; the store fills it in when the client leaves it out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

impl Entity for TreatmentPlan {
    const NAME: &'static str = "TreatmentPlan";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("patientId", FieldType::String),
        FieldSpec::required("clinicId", FieldType::String),
        FieldSpec::required("title", FieldType::String),
        FieldSpec::required("description", FieldType::String),
        FieldSpec::defaulted("status", FieldType::String, FieldDefault::Str(DEFAULT_STATUS)),
        FieldSpec::optional("createdAt", FieldType::Date),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let patient_id = r.required_string("patientId");
        let clinic_id = r.required_string("clinicId");
        let title = r.required_string("title");
        let description = r.required_string("description");
        let status = r.string_or("status", DEFAULT_STATUS);
        let created_at = r.optional_date("createdAt");
        Some(Self {
            id,
            patient_id: patient_id?,
            clinic_id: clinic_id?,
            title: title?,
            description: description?,
            status: status?,
            created_at,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::object;
    use serde_json::json;

    #[test]
    fn test_status_defaults_to_pending() {
        let plan = TreatmentPlan::parse(&object(json!({
            "patientId": "p1", "clinicId": "c1",
            "title": "Full-mouth rehab", "description": "Phase 1: scaling"
        })))
        .unwrap();
        assert_eq!(plan.status, "pending");
        assert_eq!(plan.patient_id, "p1");
        assert_eq!(plan.created_at, None);
    }

    #[test]
    fn test_created_at() {
        let input = json!({
            "patientId": "p1", "clinicId": "c1", "title": "Whitening",
            "description": "Two sessions", "status": "pending", "createdAt": "2024-04-20"
        });
        let plan = TreatmentPlan::parse(&object(input.clone())).unwrap();
        assert_eq!(plan.created_at, NaiveDate::from_ymd_opt(2024, 4, 20));
        assert_eq!(plan.encode(), input);

        let mut bad = input;
        bad["createdAt"] = json!("last week");
        let err = TreatmentPlan::parse(&object(bad)).unwrap_err();
        assert_eq!(err.kind_of("createdAt"), Some(&crate::error::FieldErrorKind::InvalidDate));
    }

    #[test]
    fn test_all_missing() {
        let err = TreatmentPlan::parse(&object(json!({}))).unwrap_err();
        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, vec!["patientId", "clinicId", "title", "description"]);
    }
}
