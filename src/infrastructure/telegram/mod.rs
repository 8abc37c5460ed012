//! Telegram Bot API adapter: wire types and a reqwest client implementing
//! [`ChatTransport`](crate::domain::services::chat_transport::ChatTransport).

pub mod api;
pub mod proxy;
pub mod types;

pub use api::TelegramApi;
