use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::models::user::User;
use crate::utils::token::{verify_token, AUTH_FAILED};
use crate::AppState;

/// The authenticated account, inserted into request extensions by
/// `require_user` and `require_admin`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// Takes `&HeaderMap` rather than `&Request`: the request body is `!Sync`,
// so borrowing the whole request across the `find_by_id` await would make
// the middleware futures `!Send`.
async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<User, Error> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Err(Error::Unauthorized(AUTH_FAILED.to_string()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized(AUTH_FAILED.to_string()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized(AUTH_FAILED.to_string()));
    };

    let claims = verify_token(token)?;

    // Tokens held by since-deleted accounts stop working here.
    let Some(user) = state.user_service.find_by_id(claims.sub).await? else {
        return Err(Error::Unauthorized(AUTH_FAILED.to_string()));
    };
    Ok(user)
}

pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match resolve_user(&state, req.headers()).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match resolve_user(&state, req.headers()).await {
        Ok(user) if user.is_admin() => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Ok(_) => Error::Forbidden("Admin access required".to_string()).into_response(),
        Err(err) => err.into_response(),
    }
}
