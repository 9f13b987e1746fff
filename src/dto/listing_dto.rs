use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::listing_service::Page;

/// Owner identity as embedded in listing detail responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T, M> From<Page<M>> for PageResponse<T>
where
    T: From<M>,
{
    fn from(value: Page<M>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            limit: value.limit,
            total_pages: value.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a successful vacancy or scholarship application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationReceipt {
    pub message: String,
    pub applicant_count: i32,
}

/// Outcome of a successful forum registration or unregistration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub message: String,
    pub attendee_count: i64,
}
