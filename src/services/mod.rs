pub mod forum_service;
pub mod listing_service;
pub mod participation_service;
pub mod scholarship_service;
pub mod user_service;
pub mod vacancy_service;
