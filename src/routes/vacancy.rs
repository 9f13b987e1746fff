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
    dto::vacancy_dto::{
        CreateVacancyPayload, UpdateVacancyPayload, VacancyDetailResponse, VacancyListQuery,
        VacancyListResponse, VacancyResponse,
    },
    error::{Error, Result},
    middleware::auth::CurrentUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/vacancies",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy created", body = Json<VacancyResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancy = state.vacancy_service.create(payload, user.id).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    get,
    path = "/vacancies",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("industry" = Option<String>, Query, description = "Filter by industry"),
        ("employment_type" = Option<String>, Query, description = "Filter by employment type"),
        ("remote" = Option<bool>, Query, description = "Filter by remote flag"),
        ("country" = Option<String>, Query, description = "Filter by country"),
        ("min_salary" = Option<String>, Query, description = "Minimum salary floor")
    ),
    responses(
        (status = 200, description = "Paginated vacancies", body = Json<VacancyListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<VacancyListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.vacancy_service.list(query).await?;
    Ok(Json(VacancyListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/vacancies/search",
    params(
        ("q" = String, Query, description = "Search term")
    ),
    responses(
        (status = 200, description = "Matching vacancies", body = Json<Vec<VacancyResponse>>),
        (status = 400, description = "Missing search term")
    )
)]
#[axum::debug_handler]
pub async fn search_vacancies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(Error::BadRequest("Search query is required".to_string()));
    }
    let vacancies = state.vacancy_service.search(term).await?;
    let items: Vec<VacancyResponse> = vacancies.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/vacancies/mine",
    responses(
        (status = 200, description = "Vacancies posted by the caller", body = Json<Vec<VacancyResponse>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn my_vacancies(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.list_by_owner(user.id).await?;
    let items: Vec<VacancyResponse> = vacancies.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/vacancies/applied",
    responses(
        (status = 200, description = "Vacancies the caller applied to", body = Json<Vec<VacancyResponse>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn applied_vacancies(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.applied_by(user.id).await?;
    let items: Vec<VacancyResponse> = vacancies.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy detail", body = Json<VacancyDetailResponse>),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get(id).await?;
    let owner = state.vacancy_service.owner_of(vacancy.created_by).await?;
    Ok(Json(VacancyDetailResponse::new(vacancy, owner)))
}

#[utoipa::path(
    put,
    path = "/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated", body = Json<VacancyResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vacancy = state.vacancy_service.update(id, user.id, payload).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy deleted", body = Json<MessageResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete_owned(id, user.id).await?;
    Ok(Json(MessageResponse::new("Vacancy deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/vacancies/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Application recorded", body = Json<ApplicationReceipt>),
        (status = 400, description = "Inactive, unverified or duplicate"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_vacancy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicant_count = state
        .participation_service
        .apply_to_vacancy(id, user.id)
        .await?;
    Ok(Json(ApplicationReceipt {
        message: "Application submitted successfully".to_string(),
        applicant_count,
    }))
}
