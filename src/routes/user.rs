use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::listing_dto::MessageResponse,
    dto::user_dto::{
        LoginPayload, RegisterPayload, TokenResponse, UpdateUserPayload, UserResponse,
    },
    error::Result,
    middleware::auth::CurrentUser,
    utils::token::issue_token,
    AppState,
};

#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created", body = Json<TokenResponse>),
        (status = 400, description = "Invalid payload or email already in use")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    let token = issue_token(user.id, &user.role)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = Json<TokenResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = issue_token(user.id, &user.role)?;
    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    get,
    path = "/user/me",
    responses(
        (status = 200, description = "Current profile", body = Json<UserResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let applications = state.user_service.application_refs(user.id).await?;
    Ok(Json(UserResponse::new(user, applications)))
}

#[utoipa::path(
    put,
    path = "/user/me",
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Profile updated", body = Json<UserResponse>),
        (status = 400, description = "Invalid or empty update")
    )
)]
#[axum::debug_handler]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let updated = state.user_service.update(user.id, payload).await?;
    let applications = state.user_service.application_refs(updated.id).await?;
    Ok(Json(UserResponse::new(updated, applications)))
}

#[utoipa::path(
    delete,
    path = "/user/me",
    responses(
        (status = 200, description = "Account removed", body = Json<MessageResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(user.id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
