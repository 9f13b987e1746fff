pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::models::{forum::ConferenceForum, scholarship::Scholarship, vacancy::Vacancy};
use crate::services::{
    listing_service::ListingService, participation_service::ParticipationService,
    user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub vacancy_service: ListingService<Vacancy>,
    pub scholarship_service: ListingService<Scholarship>,
    pub forum_service: ListingService<ConferenceForum>,
    pub participation_service: ParticipationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let vacancy_service = ListingService::new(pool.clone());
        let scholarship_service = ListingService::new(pool.clone());
        let forum_service = ListingService::new(pool.clone());
        let participation_service = ParticipationService::new(pool.clone());

        Self {
            pool,
            user_service,
            vacancy_service,
            scholarship_service,
            forum_service,
            participation_service,
        }
    }
}
