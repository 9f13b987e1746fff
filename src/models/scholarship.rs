use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::listing::Listing;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Scholarship {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub provider_name: String,
    pub provider_type: String,
    pub provider_website: Option<String>,
    pub amount_value: Decimal,
    pub amount_currency: String,
    pub amount_full_ride: bool,
    pub eligibility: Vec<String>,
    pub education_level: String,
    pub min_gpa: Option<Decimal>,
    pub fields_of_study: Vec<String>,
    pub application_deadline: DateTime<Utc>,
    pub application_link: String,
    pub required_docs: Vec<String>,
    pub host_country: String,
    pub host_institution: Option<String>,
    pub total_slots: i32,
    pub is_active: bool,
    pub is_verified: bool,
    pub applicant_count: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing for Scholarship {
    const TABLE: &'static str = "scholarships";
    const LABEL: &'static str = "scholarship";
    const NOT_FOUND: &'static str = "Scholarship not found";
    const SEARCH_EXPRS: &'static [&'static str] = &[
        "title",
        "description",
        "provider_name",
        "array_to_string(fields_of_study, ' ')",
    ];
    const DEFAULT_ORDER: &'static str = "created_at DESC";

    fn created_by(&self) -> Uuid {
        self.created_by
    }
}
