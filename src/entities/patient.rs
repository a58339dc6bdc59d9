use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldDefault, FieldReader, FieldSpec, FieldType};

/// A patient of the practice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-text history entries, oldest first
    pub medical_history: Vec<String>,
}

impl Entity for Patient {
    const NAME: &'static str = "Patient";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("name", FieldType::String),
        FieldSpec::required("dob", FieldType::Date),
        FieldSpec::required("gender", FieldType::String),
        FieldSpec::optional("contact", FieldType::String),
        FieldSpec::optional("email", FieldType::Email),
        FieldSpec::optional("address", FieldType::String),
        FieldSpec::defaulted("medicalHistory", FieldType::StringList, FieldDefault::EmptyList),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let name = r.required_string("name");
        let dob = r.required_date("dob");
        let gender = r.required_string("gender");
        let contact = r.optional_string("contact");
        let email = r.optional_email("email");
        let address = r.optional_string("address");
        let medical_history = r.string_list("medicalHistory");
        Some(Self {
            id,
            name: name?,
            dob: dob?,
            gender: gender?,
            contact,
            email,
            address,
            medical_history: medical_history?,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
