use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::schema::{FieldKind, FieldSpec, Model};

/// A registered user account.
///
/// `password` is populated only when a read asks for it explicitly; default
/// reads leave it as `None`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    /// No uniqueness or format constraint.
    pub email_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Model for User {
    const NAME: &'static str = "Users";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("firstName", FieldKind::String),
        FieldSpec::required("lastName", FieldKind::String),
        FieldSpec::required("emailAddress", FieldKind::String),
        FieldSpec::required("password", FieldKind::String).hidden(),
    ];
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Payload for creating a new user.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl UserCreate {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for updating an existing user.
#[derive(Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_declared_field_names() {
        let user = User {
            id: RecordId::from_u128(1),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            password: None,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": RecordId::from_u128(1).to_string(),
                "firstName": "Ada",
                "lastName": "Lovelace",
                "emailAddress": "ada@example.com",
            })
        );
    }

    #[test]
    fn debug_never_prints_password() {
        let payload = UserCreate::new("Ada", "Lovelace", "ada@example.com", "hunter2");
        assert!(!format!("{payload:?}").contains("hunter2"));

        let patch = UserPatch { password: Some("hunter2".into()), ..UserPatch::default() };
        assert!(!format!("{patch:?}").contains("hunter2"));
    }
}
