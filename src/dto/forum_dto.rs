use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dto::listing_dto::{OwnerSummary, PageResponse};
use crate::models::forum::ConferenceForum;

pub const DATE_ORDER_MESSAGE: &str = "End date must be after or equal to start date.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrganizerInfo {
    #[validate(length(min = 1, message = "Organizer name is required"))]
    pub name: String,
    #[validate(email(message = "Organizer email must be valid"))]
    pub email: String,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_date_order, skip_on_field_errors = false))]
pub struct CreateForumPayload {
    #[validate(custom(function = crate::utils::validation::validate_forum_title))]
    pub title: String,
    #[validate(custom(function = crate::utils::validation::validate_forum_description))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(nested)]
    pub organizer: OrganizerInfo,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_virtual: bool,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
}

fn validate_date_order(payload: &CreateForumPayload) -> Result<(), ValidationError> {
    if payload.end_date < payload.start_date {
        let mut err = ValidationError::new("date_order");
        err.message = Some(DATE_ORDER_MESSAGE.into());
        return Err(err);
    }
    Ok(())
}

// Date ordering for partial updates is re-checked against the merged
// record in the service, since either bound may be absent here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateForumPayload {
    #[validate(custom(function = crate::utils::validation::validate_forum_title))]
    pub title: Option<String>,
    #[validate(custom(function = crate::utils::validation::validate_forum_description))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub organizer: Option<OrganizerInfo>,
    pub tags: Option<Vec<String>>,
    pub is_virtual: Option<bool>,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer: OrganizerInfo,
    pub tags: Vec<String>,
    pub is_virtual: bool,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub is_verified: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer: OrganizerInfo,
    pub tags: Vec<String>,
    pub is_virtual: bool,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub is_verified: bool,
    pub created_by: OwnerSummary,
    pub attendees: Vec<OwnerSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForumListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_virtual: Option<bool>,
}

pub type ForumListResponse = PageResponse<ForumResponse>;

impl From<ConferenceForum> for ForumResponse {
    fn from(value: ConferenceForum) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            location: value.location,
            start_date: value.start_date,
            end_date: value.end_date,
            organizer: OrganizerInfo {
                name: value.organizer_name,
                email: value.organizer_email,
                website: value.organizer_website,
            },
            tags: value.tags,
            is_virtual: value.is_virtual,
            registration_link: value.registration_link,
            max_attendees: value.max_attendees,
            is_verified: value.is_verified,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl ForumDetailResponse {
    pub fn new(forum: ConferenceForum, owner: OwnerSummary, attendees: Vec<OwnerSummary>) -> Self {
        let base = ForumResponse::from(forum);
        Self {
            id: base.id,
            title: base.title,
            description: base.description,
            location: base.location,
            start_date: base.start_date,
            end_date: base.end_date,
            organizer: base.organizer,
            tags: base.tags,
            is_virtual: base.is_virtual,
            registration_link: base.registration_link,
            max_attendees: base.max_attendees,
            is_verified: base.is_verified,
            created_by: owner,
            attendees,
            created_at: base.created_at,
            updated_at: base.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateForumPayload {
        serde_json::from_value(serde_json::json!({
            "title": "RustConf Eurasia",
            "description": "Two days of talks and workshops on systems programming, covering async runtimes and embedded targets.",
            "location": "Tashkent",
            "start_date": "2026-10-01T09:00:00Z",
            "end_date": "2026-10-02T18:00:00Z",
            "organizer": { "name": "Rust Community UZ", "email": "team@rustconf.uz" }
        }))
        .unwrap()
    }

    #[test]
    fn well_formed_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let mut payload = valid_payload();
        payload.end_date = payload.start_date - chrono::Duration::days(1);
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains(DATE_ORDER_MESSAGE));
    }

    #[test]
    fn equal_dates_are_allowed() {
        let mut payload = valid_payload();
        payload.end_date = payload.start_date;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn organizer_email_is_checked() {
        let mut payload = valid_payload();
        payload.organizer.email = "not-an-email".into();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Organizer email must be valid"));
    }

    #[test]
    fn update_payload_does_not_require_both_dates() {
        let payload = UpdateForumPayload {
            end_date: Some(Utc::now()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }
}
