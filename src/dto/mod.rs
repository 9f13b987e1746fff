pub mod forum_dto;
pub mod listing_dto;
pub mod scholarship_dto;
pub mod user_dto;
pub mod vacancy_dto;
