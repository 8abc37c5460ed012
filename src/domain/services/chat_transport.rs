use async_trait::async_trait;

use crate::domain::{
    error::TransportError,
    models::message::{InboundUpdate, InlineAnswer, Reply},
};

/// Outbound and inbound operations of the chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Username of the bot account, used to verify the token at startup.
    async fn get_me(&self) -> Result<String, TransportError>;

    /// Long-poll for updates with `update_id >= offset`.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<InboundUpdate>, TransportError>;

    async fn send_message(&self, reply: &Reply) -> Result<(), TransportError>;

    async fn answer_inline_query(&self, answer: &InlineAnswer) -> Result<(), TransportError>;

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TransportError>;
}
