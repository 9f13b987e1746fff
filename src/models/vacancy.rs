use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::listing::Listing;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub location_city: String,
    pub location_state: Option<String>,
    pub location_country: String,
    pub location_remote: bool,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub salary_currency: String,
    pub employment_type: String,
    pub industry: Option<String>,
    pub skills: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub contact_website: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub applicant_count: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing for Vacancy {
    const TABLE: &'static str = "vacancies";
    const LABEL: &'static str = "vacancy";
    const NOT_FOUND: &'static str = "Vacancy not found";
    const SEARCH_EXPRS: &'static [&'static str] = &["title", "company", "description"];
    const DEFAULT_ORDER: &'static str = "created_at DESC";

    fn created_by(&self) -> Uuid {
        self.created_by
    }
}
