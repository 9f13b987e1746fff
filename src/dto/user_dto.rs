use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = crate::utils::validation::validate_password_digit)
    )]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = crate::utils::validation::validate_password_digit)
    )]
    pub password: Option<String>,
}

impl UpdateUserPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Ids of the listings the user has applied to or registered for,
/// most recent first.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplicationRefs {
    pub vacancies: Vec<Uuid>,
    pub scholarships: Vec<Uuid>,
    pub forums: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub applications: ApplicationRefs,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    pub fn new(user: User, applications: ApplicationRefs) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            applications,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_collects_all_violations() {
        let payload = RegisterPayload {
            name: String::new(),
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let errors = payload.validate().unwrap_err();
        let rendered = serde_json::to_string(&errors).unwrap();
        assert!(rendered.contains("Name is required"));
        assert!(rendered.contains("Please provide a valid email"));
        assert!(rendered.contains("Password must be at least 6 characters long"));
    }

    #[test]
    fn register_password_needs_a_digit() {
        let payload = RegisterPayload {
            name: "Ana".into(),
            email: "a@x.com".into(),
            password: "abcdef".into(),
        };
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Password must contain at least one number"));

        let payload = RegisterPayload {
            name: "Ana".into(),
            email: "a@x.com".into(),
            password: "abc123".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn empty_update_payload_is_detectable() {
        let payload: UpdateUserPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.is_empty());
        assert!(payload.validate().is_ok());
    }
}
