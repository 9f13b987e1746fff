use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::listing_dto::{OwnerSummary, PageResponse};
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub state: Option<String>,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[serde(default)]
    pub remote: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SalaryRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: default_currency(),
        }
    }
}

pub(crate) fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(email(message = "Contact email is required and must be valid"))]
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    #[validate(custom(function = crate::utils::validation::validate_vacancy_title))]
    pub title: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company: String,
    #[validate(custom(function = crate::utils::validation::validate_vacancy_description))]
    pub description: String,
    pub requirements: Option<Vec<String>>,
    #[validate(nested)]
    pub location: Location,
    #[validate(nested)]
    pub salary: Option<SalaryRange>,
    #[validate(custom(function = crate::utils::validation::validate_employment_type))]
    pub employment_type: String,
    pub industry: Option<String>,
    pub skills: Option<Vec<String>>,
    pub application_deadline: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateVacancyPayload {
    #[validate(custom(function = crate::utils::validation::validate_vacancy_title))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company: Option<String>,
    #[validate(custom(function = crate::utils::validation::validate_vacancy_description))]
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    #[validate(nested)]
    pub location: Option<Location>,
    #[validate(nested)]
    pub salary: Option<SalaryRange>,
    #[validate(custom(function = crate::utils::validation::validate_employment_type))]
    pub employment_type: Option<String>,
    pub industry: Option<String>,
    pub skills: Option<Vec<String>>,
    pub application_deadline: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub contact: Option<ContactInfo>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub location: Location,
    pub salary: SalaryRange,
    pub employment_type: String,
    pub industry: Option<String>,
    pub skills: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub contact: ContactInfo,
    pub is_active: bool,
    pub is_verified: bool,
    pub applicant_count: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Same shape as `VacancyResponse` but with the owner expanded, as
/// returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub location: Location,
    pub salary: SalaryRange,
    pub employment_type: String,
    pub industry: Option<String>,
    pub skills: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub contact: ContactInfo,
    pub is_active: bool,
    pub is_verified: bool,
    pub applicant_count: i32,
    pub created_by: OwnerSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancyListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub remote: Option<bool>,
    pub country: Option<String>,
    pub min_salary: Option<Decimal>,
}

pub type VacancyListResponse = PageResponse<VacancyResponse>;

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            description: value.description,
            requirements: value.requirements,
            location: Location {
                city: value.location_city,
                state: value.location_state,
                country: value.location_country,
                remote: value.location_remote,
            },
            salary: SalaryRange {
                min: value.salary_min,
                max: value.salary_max,
                currency: value.salary_currency,
            },
            employment_type: value.employment_type,
            industry: value.industry,
            skills: value.skills,
            application_deadline: value.application_deadline,
            contact: ContactInfo {
                email: value.contact_email,
                phone: value.contact_phone,
                website: value.contact_website,
            },
            is_active: value.is_active,
            is_verified: value.is_verified,
            applicant_count: value.applicant_count,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl VacancyDetailResponse {
    pub fn new(vacancy: Vacancy, owner: OwnerSummary) -> Self {
        let base = VacancyResponse::from(vacancy);
        Self {
            id: base.id,
            title: base.title,
            company: base.company,
            description: base.description,
            requirements: base.requirements,
            location: base.location,
            salary: base.salary,
            employment_type: base.employment_type,
            industry: base.industry,
            skills: base.skills,
            application_deadline: base.application_deadline,
            contact: base.contact,
            is_active: base.is_active,
            is_verified: base.is_verified,
            applicant_count: base.applicant_count,
            created_by: owner,
            created_at: base.created_at,
            updated_at: base.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateVacancyPayload {
        serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "We are looking for an engineer with strong systems background.",
            "location": { "city": "Berlin", "country": "Germany" },
            "employment_type": "Full-time",
            "contact": { "email": "jobs@acme.io" }
        }))
        .unwrap()
    }

    #[test]
    fn minimal_payload_passes_validation() {
        let payload = valid_payload();
        assert!(payload.validate().is_ok());
        assert!(!payload.location.remote);
    }

    #[test]
    fn empty_title_reports_title_requirement() {
        let mut payload = valid_payload();
        payload.title = String::new();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Job title is required"));
    }

    #[test]
    fn short_description_and_bad_enum_are_both_reported() {
        let mut payload = valid_payload();
        payload.description = "too short".into();
        payload.employment_type = "Gig".into();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Description must be at least 50 characters long"));
        assert!(rendered.contains("Employment type must be one of"));
    }

    #[test]
    fn nested_location_violations_surface() {
        let mut payload = valid_payload();
        payload.location.city = String::new();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("City is required"));
    }

    #[test]
    fn verification_flags_in_payload_are_ignored() {
        let payload: CreateVacancyPayload = serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "We are looking for an engineer with strong systems background.",
            "location": { "city": "Berlin", "country": "Germany" },
            "employment_type": "Full-time",
            "contact": { "email": "jobs@acme.io" },
            "is_verified": true,
            "is_active": false,
            "applicant_count": 99
        }))
        .unwrap();
        // Unknown fields fall away at deserialization; the insert path never
        // reads client-controlled flags.
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn salary_currency_defaults_to_usd() {
        let salary: SalaryRange = serde_json::from_value(serde_json::json!({
            "min": "50000",
            "max": "70000"
        }))
        .unwrap();
        assert_eq!(salary.currency, "USD");
    }
}
