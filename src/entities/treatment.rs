use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Number;

use crate::entity::Entity;
use crate::field::{FieldReader, FieldSpec, FieldType};

/// A treatment performed on a patient by a doctor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Treatment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient: String,
    pub doctor: String,
    pub description: String,
    pub date: NaiveDate,
    /// Expected non-negative; not enforced here. Kept as the JSON number
    /// received so integer amounts encode back as integers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Number>,
}

impl Treatment {
    pub fn cost_amount(&self) -> Option<f64> {
        self.cost.as_ref().and_then(Number::as_f64)
    }
}

impl Entity for Treatment {
    const NAME: &'static str = "Treatment";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("patient", FieldType::String),
        FieldSpec::required("doctor", FieldType::String),
        FieldSpec::required("description", FieldType::String),
        FieldSpec::required("date", FieldType::Date),
        FieldSpec::optional("cost", FieldType::Number),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let patient = r.required_string("patient");
        let doctor = r.required_string("doctor");
        let description = r.required_string("description");
        let date = r.required_date("date");
        let cost = r.optional_number("cost");
        Some(Self {
            id,
            patient: patient?,
            doctor: doctor?,
            description: description?,
            date: date?,
            cost,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
