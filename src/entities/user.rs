//! Application user account

use serde::Serialize;

use crate::entity::Entity;
use crate::field::{FieldReader, FieldSpec, FieldType};

/// A login-capable user.
///
/// `password` is stored as received; hashing is the job of the auth layer.
/// Uniqueness of `username` and `email` is left to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub role: String,
    pub name: String,
    pub email: String,
}

impl Entity for User {
    const NAME: &'static str = "User";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldType::String),
        FieldSpec::required("username", FieldType::String),
        FieldSpec::required("password", FieldType::String),
        FieldSpec::required("role", FieldType::String),
        FieldSpec::required("name", FieldType::String),
        FieldSpec::required("email", FieldType::Email),
    ];

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let id = r.optional_string("id");
        let username = r.required_string("username");
        let password = r.required_string("password");
        let role = r.required_string("role");
        let name = r.required_string("name");
        let email = r.required_email("email");
        Some(Self {
            id,
            username: username?,
            password: password?,
            role: role?,
            name: name?,
            email: email?,
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
    fn test_parse_user() {
        let input = object(json!({
            "username": "dr.amal",
            "password": "$2b$10$hash",
            "role": "doctor",
            "name": "Amal Saleh",
            "email": "a@b.com"
        }));
        let user = User::parse(&input).unwrap();
        assert_eq!(user.id, None);
        assert_eq!(user.username, "dr.amal");
        assert_eq!(user.role, "doctor");
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn test_email_is_required() {
        let input = object(json!({
            "username": "u", "password": "p", "role": "admin", "name": "N"
        }));
        let err = User::parse(&input).unwrap_err();
        assert_eq!(err.entity, "User");
        assert_eq!(err.kind_of("email"), Some(&FieldErrorKind::Missing));
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_role_is_free_form() {
        let input = object(json!({
            "username": "u", "password": "p", "role": "receptionist-night-shift",
            "name": "N", "email": "n@clinic.org"
        }));
        assert_eq!(User::parse(&input).unwrap().role, "receptionist-night-shift");
    }
}
