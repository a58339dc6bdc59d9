use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldReader, FieldSpec, FieldType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient: String,
    pub doctor: String,
    pub report_type: String,
    pub content: String,
    pub date: NaiveDate,
}

impl Entity for Report {
    const NAME: &'static str = "Report";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("patient", FieldType::String),
        FieldSpec::required("doctor", FieldType::String),
        FieldSpec::required("reportType", FieldType::String),
        FieldSpec::required("content", FieldType::String),
        FieldSpec::required("date", FieldType::Date),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let patient = r.required_string("patient");
        let doctor = r.required_string("doctor");
        let report_type = r.required_string("reportType");
        let content = r.required_string("content");
        let date = r.required_date("date");
        Some(Self {
            id,
            patient: patient?,
            doctor: doctor?,
            report_type: report_type?,
            content: content?,
            date: date?,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
