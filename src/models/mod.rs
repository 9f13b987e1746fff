pub mod forum;
pub mod listing;
pub mod scholarship;
pub mod user;
pub mod vacancy;
