use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldReader, FieldSpec, FieldType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Identifier of the clinic the doctor practises at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,
}

impl Entity for Doctor {
    const NAME: &'static str = "Doctor";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("name", FieldType::String),
        FieldSpec::required("specialization", FieldType::String),
        FieldSpec::optional("contact", FieldType::String),
        FieldSpec::optional("email", FieldType::Email),
        FieldSpec::optional("clinic", FieldType::String),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let name = r.required_string("name");
        let specialization = r.required_string("specialization");
        let contact = r.optional_string("contact");
        let email = r.optional_email("email");
        let clinic = r.optional_string("clinic");
        Some(Self {
            id,
            name: name?,
            specialization: specialization?,
            contact,
            email,
            clinic,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
