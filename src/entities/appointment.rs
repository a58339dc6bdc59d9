use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldDefault, FieldReader, FieldSpec, FieldType};

pub const DEFAULT_STATUS: &str = "scheduled";

/// A booked visit.
///
/// `time` is kept as the client sent it, and `status` accepts any string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient: String,
    pub doctor: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Appointment {
    const NAME: &'static str = "Appointment";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("patient", FieldType::String),
        FieldSpec::required("doctor", FieldType::String),
        FieldSpec::required("date", FieldType::Date),
        FieldSpec::required("time", FieldType::String),
        FieldSpec::defaulted("status", FieldType::String, FieldDefault::Str(DEFAULT_STATUS)),
        FieldSpec::optional("notes", FieldType::String),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let patient = r.required_string("patient");
        let doctor = r.required_string("doctor");
        let date = r.required_date("date");
        let time = r.required_string("time");
        let status = r.string_or("status", DEFAULT_STATUS);
        let notes = r.optional_string("notes");
        Some(Self {
            id,
            patient: patient?,
            doctor: doctor?,
            date: date?,
            time: time?,
            status: status?,
            notes,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
