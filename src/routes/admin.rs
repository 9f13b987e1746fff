use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::forum_dto::ForumResponse,
    dto::scholarship_dto::ScholarshipResponse,
    dto::vacancy_dto::VacancyResponse,
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/admin/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy verified", body = Json<VacancyResponse>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn verify_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.verify(id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    post,
    path = "/admin/scholarships/{id}",
    params(
        ("id" = Uuid, Path, description = "Scholarship ID")
    ),
    responses(
        (status = 200, description = "Scholarship verified", body = Json<ScholarshipResponse>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Scholarship not found")
    )
)]
#[axum::debug_handler]
pub async fn verify_scholarship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scholarship = state.scholarship_service.verify(id).await?;
    Ok(Json(ScholarshipResponse::from(scholarship)))
}

#[utoipa::path(
    post,
    path = "/admin/forums/{id}",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    responses(
        (status = 200, description = "Conference/forum verified", body = Json<ForumResponse>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn verify_forum(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let forum = state.forum_service.verify(id).await?;
    Ok(Json(ForumResponse::from(forum)))
}
