use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::listing_dto::{OwnerSummary, PageResponse};
use crate::dto::vacancy_dto::default_currency;
use crate::models::scholarship::Scholarship;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderInfo {
    #[validate(length(min = 1, message = "Provider name is required"))]
    pub name: String,
    #[serde(rename = "type", default = "default_provider_type")]
    #[validate(custom(function = crate::utils::validation::validate_provider_type))]
    pub kind: String,
    pub website: Option<String>,
}

fn default_provider_type() -> String {
    "Other".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AmountInfo {
    #[validate(required(message = "Amount value is required"))]
    pub value: Option<Decimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_full_ride: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QualificationsInfo {
    #[validate(custom(function = crate::utils::validation::validate_education_level))]
    pub education_level: String,
    pub min_gpa: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationProcess {
    #[validate(required(message = "Application deadline is required"))]
    pub deadline: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Application link is required"))]
    pub link: String,
    #[serde(default)]
    pub required_docs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateScholarshipPayload {
    #[validate(custom(function = crate::utils::validation::validate_scholarship_title))]
    pub title: String,
    #[validate(custom(function = crate::utils::validation::validate_scholarship_description))]
    pub description: String,
    #[validate(nested)]
    pub provider: ProviderInfo,
    #[validate(nested)]
    pub amount: AmountInfo,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[validate(nested)]
    pub qualifications: QualificationsInfo,
    #[validate(length(min = 1, message = "At least one field of study is required"))]
    pub fields_of_study: Vec<String>,
    #[validate(nested)]
    pub application_process: ApplicationProcess,
    #[validate(length(min = 1, message = "Host country is required"))]
    pub host_country: String,
    pub host_institution: Option<String>,
    pub total_slots: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateScholarshipPayload {
    #[validate(custom(function = crate::utils::validation::validate_scholarship_title))]
    pub title: Option<String>,
    #[validate(custom(function = crate::utils::validation::validate_scholarship_description))]
    pub description: Option<String>,
    #[validate(nested)]
    pub provider: Option<ProviderInfo>,
    #[validate(nested)]
    pub amount: Option<AmountInfo>,
    pub eligibility: Option<Vec<String>>,
    #[validate(nested)]
    pub qualifications: Option<QualificationsInfo>,
    #[validate(length(min = 1, message = "At least one field of study is required"))]
    pub fields_of_study: Option<Vec<String>>,
    #[validate(nested)]
    pub application_process: Option<ApplicationProcess>,
    #[validate(length(min = 1, message = "Host country is required"))]
    pub host_country: Option<String>,
    pub host_institution: Option<String>,
    pub total_slots: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub provider: ProviderInfo,
    pub amount: AmountInfo,
    pub eligibility: Vec<String>,
    pub qualifications: QualificationsInfo,
    pub fields_of_study: Vec<String>,
    pub application_process: ApplicationProcess,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub provider: ProviderInfo,
    pub amount: AmountInfo,
    pub eligibility: Vec<String>,
    pub qualifications: QualificationsInfo,
    pub fields_of_study: Vec<String>,
    pub application_process: ApplicationProcess,
    pub host_country: String,
    pub host_institution: Option<String>,
    pub total_slots: i32,
    pub is_active: bool,
    pub is_verified: bool,
    pub applicant_count: i32,
    pub created_by: OwnerSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScholarshipListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub country: Option<String>,
    pub field: Option<String>,
    pub provider: Option<String>,
    pub education_level: Option<String>,
}

pub type ScholarshipListResponse = PageResponse<ScholarshipResponse>;

impl From<Scholarship> for ScholarshipResponse {
    fn from(value: Scholarship) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            provider: ProviderInfo {
                name: value.provider_name,
                kind: value.provider_type,
                website: value.provider_website,
            },
            amount: AmountInfo {
                value: Some(value.amount_value),
                currency: value.amount_currency,
                is_full_ride: value.amount_full_ride,
            },
            eligibility: value.eligibility,
            qualifications: QualificationsInfo {
                education_level: value.education_level,
                min_gpa: value.min_gpa,
            },
            fields_of_study: value.fields_of_study,
            application_process: ApplicationProcess {
                deadline: Some(value.application_deadline),
                link: value.application_link,
                required_docs: value.required_docs,
            },
            host_country: value.host_country,
            host_institution: value.host_institution,
            total_slots: value.total_slots,
            is_active: value.is_active,
            is_verified: value.is_verified,
            applicant_count: value.applicant_count,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl ScholarshipDetailResponse {
    pub fn new(scholarship: Scholarship, owner: OwnerSummary) -> Self {
        let base = ScholarshipResponse::from(scholarship);
        Self {
            id: base.id,
            title: base.title,
            description: base.description,
            provider: base.provider,
            amount: base.amount,
            eligibility: base.eligibility,
            qualifications: base.qualifications,
            fields_of_study: base.fields_of_study,
            application_process: base.application_process,
            host_country: base.host_country,
            host_institution: base.host_institution,
            total_slots: base.total_slots,
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

    fn valid_payload() -> CreateScholarshipPayload {
        serde_json::from_value(serde_json::json!({
            "title": "Global Excellence Grant",
            "description": "A fully funded scholarship for graduate students in engineering disciplines, covering tuition and living costs for the duration of the program.",
            "provider": { "name": "TU Berlin" },
            "amount": { "value": "20000" },
            "qualifications": { "education_level": "Master" },
            "fields_of_study": ["engineering"],
            "application_process": {
                "deadline": "2026-12-01T00:00:00Z",
                "link": "https://example.org/apply"
            },
            "host_country": "Germany"
        }))
        .unwrap()
    }

    #[test]
    fn provider_type_defaults_to_other() {
        let payload = valid_payload();
        assert_eq!(payload.provider.kind, "Other");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn unknown_education_level_is_rejected() {
        let mut payload = valid_payload();
        payload.qualifications.education_level = "PhD".into();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Education level must be one of"));
    }

    #[test]
    fn fields_of_study_must_not_be_empty() {
        let mut payload = valid_payload();
        payload.fields_of_study.clear();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("At least one field of study is required"));
    }

    #[test]
    fn short_description_is_rejected() {
        let mut payload = valid_payload();
        payload.description = "Too short for a scholarship description".into();
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Description must be at least 100 characters long"));
    }

    #[test]
    fn missing_amount_value_and_deadline_are_reported() {
        let mut payload = valid_payload();
        payload.amount.value = None;
        payload.application_process.deadline = None;
        let rendered = serde_json::to_string(&payload.validate().unwrap_err()).unwrap();
        assert!(rendered.contains("Amount value is required"));
        assert!(rendered.contains("Application deadline is required"));
    }
}
