use async_trait::async_trait;

use crate::domain::{
    error::CommandError,
    models::message::{IncomingMessage, Reply},
};

pub mod friend_code_handler;
pub mod inline_handler;

/// A bot command bound to a name in the dispatcher.
///
/// `Ok(None)` means the command deliberately produced nothing to send.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError>;
}
