use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::listing::Listing;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConferenceForum {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub organizer_website: Option<String>,
    pub tags: Vec<String>,
    pub is_virtual: bool,
    pub registration_link: Option<String>,
    pub max_attendees: Option<i32>,
    pub is_verified: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing for ConferenceForum {
    const TABLE: &'static str = "conference_forums";
    const LABEL: &'static str = "conference/forum";
    const NOT_FOUND: &'static str = "Conference/Forum not found";
    const SEARCH_EXPRS: &'static [&'static str] = &[
        "title",
        "description",
        "organizer_name",
        "array_to_string(tags, ' ')",
    ];
    const DEFAULT_ORDER: &'static str = "start_date ASC";

    fn created_by(&self) -> Uuid {
        self.created_by
    }
}
