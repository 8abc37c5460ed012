pub mod friend_code_repository;
pub mod membership_repository;
pub mod user_registration_repository;
