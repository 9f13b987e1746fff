use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::listing_dto::{ApplicationReceipt, MessageResponse, SearchQuery},
    dto::scholarship_dto::{
        CreateScholarshipPayload, ScholarshipDetailResponse, ScholarshipListQuery,
        ScholarshipListResponse, ScholarshipResponse, UpdateScholarshipPayload,
    },
    error::{Error, Result},
    middleware::auth::CurrentUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/scholarships",
    request_body = CreateScholarshipPayload,
    responses(
        (status = 201, description = "Scholarship created", body = Json<ScholarshipResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_scholarship(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateScholarshipPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let scholarship = state.scholarship_service.create(payload, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScholarshipResponse::from(scholarship)),
    ))
}

#[utoipa::path(
    get,
    path = "/scholarships",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("country" = Option<String>, Query, description = "Filter by host country"),
        ("field" = Option<String>, Query, description = "Filter by field of study"),
        ("provider" = Option<String>, Query, description = "Filter by provider type"),
        ("education_level" = Option<String>, Query, description = "Filter by education level")
    ),
    responses(
        (status = 200, description = "Paginated scholarships", body = Json<ScholarshipListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_scholarships(
    State(state): State<AppState>,
    Query(query): Query<ScholarshipListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.scholarship_service.list(query).await?;
    Ok(Json(ScholarshipListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/scholarships/search",
    params(
        ("q" = String, Query, description = "Search term")
    ),
    responses(
        (status = 200, description = "Matching scholarships", body = Json<Vec<ScholarshipResponse>>),
        (status = 400, description = "Missing search term")
    )
)]
#[axum::debug_handler]
pub async fn search_scholarships(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(Error::BadRequest("Search query is required".to_string()));
    }
    let scholarships = state.scholarship_service.search(term).await?;
    let items: Vec<ScholarshipResponse> = scholarships.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/scholarships/recent",
    responses(
        (status = 200, description = "Ten most recent active scholarships", body = Json<Vec<ScholarshipResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn recent_scholarships(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let scholarships = state.scholarship_service.recent().await?;
    let items: Vec<ScholarshipResponse> = scholarships.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/scholarships/{id}",
    params(
        ("id" = Uuid, Path, description = "Scholarship ID")
    ),
    responses(
        (status = 200, description = "Scholarship detail", body = Json<ScholarshipDetailResponse>),
        (status = 404, description = "Scholarship not found")
    )
)]
#[axum::debug_handler]
pub async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scholarship = state.scholarship_service.get(id).await?;
    let owner = state
        .scholarship_service
        .owner_of(scholarship.created_by)
        .await?;
    Ok(Json(ScholarshipDetailResponse::new(scholarship, owner)))
}

#[utoipa::path(
    put,
    path = "/scholarships/{id}",
    params(
        ("id" = Uuid, Path, description = "Scholarship ID")
    ),
    request_body = UpdateScholarshipPayload,
    responses(
        (status = 200, description = "Scholarship updated", body = Json<ScholarshipResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Scholarship not found")
    )
)]
#[axum::debug_handler]
pub async fn update_scholarship(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateScholarshipPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let scholarship = state
        .scholarship_service
        .update(id, user.id, payload)
        .await?;
    Ok(Json(ScholarshipResponse::from(scholarship)))
}

#[utoipa::path(
    delete,
    path = "/scholarships/{id}",
    params(
        ("id" = Uuid, Path, description = "Scholarship ID")
    ),
    responses(
        (status = 200, description = "Scholarship deleted", body = Json<MessageResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Scholarship not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_scholarship(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.scholarship_service.delete_owned(id, user.id).await?;
    Ok(Json(MessageResponse::new("Scholarship removed")))
}

#[utoipa::path(
    post,
    path = "/scholarships/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Scholarship ID")
    ),
    responses(
        (status = 200, description = "Application recorded", body = Json<ApplicationReceipt>),
        (status = 400, description = "Inactive, unverified or duplicate"),
        (status = 404, description = "Scholarship not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_scholarship(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicant_count = state
        .participation_service
        .apply_to_scholarship(id, user.id)
        .await?;
    Ok(Json(ApplicationReceipt {
        message: "Application submitted successfully".to_string(),
        applicant_count,
    }))
}
