use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::forum_dto::{
        CreateForumPayload, ForumDetailResponse, ForumListQuery, ForumListResponse, ForumResponse,
        UpdateForumPayload,
    },
    dto::listing_dto::{MessageResponse, RegistrationReceipt, SearchQuery},
    error::{Error, Result},
    middleware::auth::CurrentUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/forums",
    request_body = CreateForumPayload,
    responses(
        (status = 201, description = "Conference/forum created", body = Json<ForumResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_forum(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateForumPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let forum = state.forum_service.create(payload, user.id).await?;
    Ok((StatusCode::CREATED, Json(ForumResponse::from(forum))))
}

#[utoipa::path(
    get,
    path = "/forums",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("location" = Option<String>, Query, description = "Filter by location substring"),
        ("start_date" = Option<String>, Query, description = "Events starting at or after"),
        ("end_date" = Option<String>, Query, description = "Events ending at or before"),
        ("is_virtual" = Option<bool>, Query, description = "Filter by virtual flag")
    ),
    responses(
        (status = 200, description = "Paginated conferences/forums", body = Json<ForumListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_forums(
    State(state): State<AppState>,
    Query(query): Query<ForumListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.forum_service.list(query).await?;
    Ok(Json(ForumListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/forums/search",
    params(
        ("q" = String, Query, description = "Search term")
    ),
    responses(
        (status = 200, description = "Matching conferences/forums", body = Json<Vec<ForumResponse>>),
        (status = 400, description = "Missing search term")
    )
)]
#[axum::debug_handler]
pub async fn search_forums(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(Error::BadRequest("Search query is required".to_string()));
    }
    let forums = state.forum_service.search(term).await?;
    let items: Vec<ForumResponse> = forums.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/forums/upcoming",
    responses(
        (status = 200, description = "Ten soonest upcoming conferences/forums", body = Json<Vec<ForumResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn upcoming_forums(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let forums = state.forum_service.upcoming().await?;
    let items: Vec<ForumResponse> = forums.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/forums/{id}",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    responses(
        (status = 200, description = "Conference/forum detail with attendees", body = Json<ForumDetailResponse>),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn get_forum(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let forum = state.forum_service.get(id).await?;
    let owner = state.forum_service.owner_of(forum.created_by).await?;
    let attendees = state.forum_service.attendees(forum.id).await?;
    Ok(Json(ForumDetailResponse::new(forum, owner, attendees)))
}

#[utoipa::path(
    put,
    path = "/forums/{id}",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    request_body = UpdateForumPayload,
    responses(
        (status = 200, description = "Conference/forum updated", body = Json<ForumResponse>),
        (status = 400, description = "Invalid payload or date order"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn update_forum(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateForumPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let forum = state.forum_service.update(id, user.id, payload).await?;
    Ok(Json(ForumResponse::from(forum)))
}

#[utoipa::path(
    delete,
    path = "/forums/{id}",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    responses(
        (status = 200, description = "Conference/forum deleted", body = Json<MessageResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_forum(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.forum_service.delete_owned(id, user.id).await?;
    Ok(Json(MessageResponse::new("Conference/Forum removed")))
}

#[utoipa::path(
    post,
    path = "/forums/{id}/register",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    responses(
        (status = 200, description = "Registration recorded", body = Json<RegistrationReceipt>),
        (status = 400, description = "Unverified, duplicate or at capacity"),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn register_for_forum(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let attendee_count = state
        .participation_service
        .register_for_forum(id, user.id)
        .await?;
    Ok(Json(RegistrationReceipt {
        message: "Registration successful".to_string(),
        attendee_count,
    }))
}

#[utoipa::path(
    post,
    path = "/forums/{id}/unregister",
    params(
        ("id" = Uuid, Path, description = "Conference/forum ID")
    ),
    responses(
        (status = 200, description = "Registration removed", body = Json<RegistrationReceipt>),
        (status = 404, description = "Conference/forum not found")
    )
)]
#[axum::debug_handler]
pub async fn unregister_from_forum(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let attendee_count = state
        .participation_service
        .unregister_from_forum(id, user.id)
        .await?;
    Ok(Json(RegistrationReceipt {
        message: "Unregistered successfully".to_string(),
        attendee_count,
    }))
}
