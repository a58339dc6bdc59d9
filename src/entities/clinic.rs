use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldReader, FieldSpec, FieldType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clinic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Entity for Clinic {
    const NAME: &'static str = "Clinic";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("name", FieldType::String),
        FieldSpec::optional("address", FieldType::String),
        FieldSpec::optional("contact", FieldType::String),
        FieldSpec::optional("email", FieldType::Email),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let name = r.required_string("name");
        let address = r.optional_string("address");
        let contact = r.optional_string("contact");
        let email = r.optional_email("email");
        Some(Self {
            id,
            name: name?,
            address,
            contact,
            email,
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
    use crate::error::FieldErrorKind;
    use serde_json::json;

    #[test]
    fn test_name_only() {
        let clinic = Clinic::parse(&object(json!({"name": "Smile Center"}))).unwrap();
        assert_eq!(clinic.name, "Smile Center");
        assert_eq!(clinic.email, None);
    }

    #[test]
    fn test_email_checked_when_present() {
        let err = Clinic::parse(&object(json!({"name": "Smile", "email": "front desk"}))).unwrap_err();
        assert_eq!(err.kind_of("email"), Some(&FieldErrorKind::InvalidEmail));

        let ok = Clinic::parse(&object(json!({"name": "Smile", "email": "desk@smile.sa"}))).unwrap();
        assert_eq!(ok.email.as_deref(), Some("desk@smile.sa"));
    }
}
