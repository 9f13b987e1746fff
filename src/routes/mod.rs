use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::middleware::auth::{require_admin, require_user};
use crate::AppState;

pub mod admin;
pub mod forum;
pub mod health;
pub mod scholarship;
pub mod user;
pub mod vacancy;

/// Assembles the full route table: a public group, a group behind
/// `require_user` and the admin verification group behind `require_admin`.
pub fn api_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/user/register", post(user::register))
        .route("/user/login", post(user::login))
        .route("/vacancies", get(vacancy::list_vacancies))
        .route("/vacancies/search", get(vacancy::search_vacancies))
        .route("/vacancies/:id", get(vacancy::get_vacancy))
        .route("/scholarships", get(scholarship::list_scholarships))
        .route("/scholarships/search", get(scholarship::search_scholarships))
        .route("/scholarships/recent", get(scholarship::recent_scholarships))
        .route("/scholarships/:id", get(scholarship::get_scholarship))
        .route("/forums", get(forum::list_forums))
        .route("/forums/search", get(forum::search_forums))
        .route("/forums/upcoming", get(forum::upcoming_forums))
        .route("/forums/:id", get(forum::get_forum));

    let authed = Router::new()
        .route(
            "/user/me",
            get(user::me).put(user::update_me).delete(user::delete_me),
        )
        .route("/vacancies", post(vacancy::create_vacancy))
        .route("/vacancies/mine", get(vacancy::my_vacancies))
        .route("/vacancies/applied", get(vacancy::applied_vacancies))
        .route(
            "/vacancies/:id",
            put(vacancy::update_vacancy).delete(vacancy::delete_vacancy),
        )
        .route("/vacancies/:id/apply", post(vacancy::apply_to_vacancy))
        .route("/scholarships", post(scholarship::create_scholarship))
        .route(
            "/scholarships/:id",
            put(scholarship::update_scholarship).delete(scholarship::delete_scholarship),
        )
        .route(
            "/scholarships/:id/apply",
            post(scholarship::apply_to_scholarship),
        )
        .route("/forums", post(forum::create_forum))
        .route(
            "/forums/:id",
            put(forum::update_forum).delete(forum::delete_forum),
        )
        .route("/forums/:id/register", post(forum::register_for_forum))
        .route("/forums/:id/unregister", post(forum::unregister_from_forum))
        .layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin_routes = Router::new()
        .route("/admin/vacancies/:id", post(admin::verify_vacancy))
        .route("/admin/scholarships/:id", post(admin::verify_scholarship))
        .route("/admin/forums/:id", post(admin::verify_forum))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public)
        .merge(authed)
        .merge(admin_routes)
        .with_state(state)
}
