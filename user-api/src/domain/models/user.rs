use serde::Serialize;
use time::OffsetDateTime;

use super::{AvatarToken, UserId};
use crate::domain::{Email, UserError};

const MAX_NAME_LENGTH: usize = 50;

/// A registered user as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<AvatarToken>,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
}

/// Validated input for registering a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn new(email: &str, first_name: &str, last_name: &str) -> Result<Self, UserError> {
        let email = Email::try_from(email).map_err(|e| UserError::invalid(e.to_string()))?;

        Ok(Self {
            email,
            first_name: validate_name("firstName", first_name)?,
            last_name: validate_name("lastName", last_name)?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn validate_name(field: &str, value: &str) -> Result<String, UserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserError::invalid(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(UserError::invalid(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Profile data served by the remote user-info API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user_info::UserInfo> for UserDetail {
    fn from(info: user_info::UserInfo) -> Self {
        Self {
            id: info.id,
            email: info.email,
            first_name: info.first_name,
            last_name: info.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_normalizes_input() {
        let user = NewUser::new("  Ada@Example.COM ", " Ada ", "Lovelace").unwrap();

        assert_eq!(user.email.as_ref(), "ada@example.com");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn new_user_rejects_bad_email() {
        let err = NewUser::new("not-an-email", "Ada", "Lovelace").unwrap_err();

        assert!(matches!(err, UserError::InvalidInput(_)));
    }

    #[test]
    fn names_are_required_and_bounded() {
        let err = NewUser::new("ada@example.com", "   ", "Lovelace").unwrap_err();
        assert!(err.to_string().contains("firstName"));

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = NewUser::new("ada@example.com", "Ada", &long).unwrap_err();
        assert!(err.to_string().contains("lastName"));

        let exact = "x".repeat(MAX_NAME_LENGTH);
        assert!(NewUser::new("ada@example.com", "Ada", &exact).is_ok());
    }

    #[test]
    fn user_detail_serializes_camel_case() {
        let detail = UserDetail {
            id: 2,
            email: "janet@example.com".to_string(),
            first_name: "Janet".to_string(),
            last_name: "Weaver".to_string(),
        };

        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["firstName"], "Janet");
        assert_eq!(json["lastName"], "Weaver");
        assert_eq!(json["id"], 2);
    }
}
