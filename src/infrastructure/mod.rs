pub mod database;
pub mod entity;
pub mod friend_code_repository;
pub mod membership_repository;
pub mod telegram;
pub mod user_registration_repository;
