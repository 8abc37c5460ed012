pub mod friend_code;
pub mod message;
pub mod user;
