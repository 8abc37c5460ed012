use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::{
    domain::{
        error::CommandError,
        models::message::{IncomingMessage, Reply},
        services::chat_transport::ChatTransport,
    },
    presentation::handlers::CommandHandler,
};

pub const ADD_FC: &str = "addfc";
pub const MY_FC: &str = "myfc";
pub const FC: &str = "fc";
pub const SEARCH_FC: &str = "sfc";
pub const FC_LIST: &str = "fclist";

/// Commands older than this are dropped, so a restart does not replay a
/// backlog into the chat.
pub const STALE_AFTER: TimeDelta = TimeDelta::seconds(30);

/// Routes group commands to their handlers and delivers the outcome.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
    transport: Arc<dyn ChatTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            handlers: HashMap::new(),
            transport,
        }
    }

    pub fn with_handler(mut self, name: &'static str, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.insert(name, Arc::new(handler));
        self
    }

    /// Run the handler bound to the message's command name.
    pub async fn route(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        let name = message
            .command
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| CommandError::diagnostic(format!("command not found: {name}")))?;
        handler.handle(message).await
    }

    /// Decide what, if anything, to send back for `message` as of `now`.
    pub async fn process(&self, message: &IncomingMessage, now: DateTime<Utc>) -> Option<Reply> {
        if !message.chat.kind.is_multi_user() {
            return None;
        }
        let command = message.command.as_ref()?;

        let age = now - message.date;
        if age > STALE_AFTER {
            debug!(
                command = %command.name,
                chat_id = message.chat.id,
                age_secs = age.num_seconds(),
                "dropping stale command"
            );
            return None;
        }

        match self.route(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    command = %command.name,
                    chat_id = message.chat.id,
                    user_id = message.sender.id.as_i64(),
                    error = %e,
                    "command failed"
                );
                e.reply_text().map(|text| Reply::error_to(message, text))
            }
        }
    }

    /// Process and deliver. Transport failures are logged, never raised.
    pub async fn dispatch(&self, message: IncomingMessage, now: DateTime<Utc>) {
        let Some(reply) = self.process(&message, now).await else {
            return;
        };
        if reply.text.is_empty() {
            debug!(chat_id = reply.chat_id, "nothing to send");
            return;
        }
        if let Err(e) = self.transport.send_message(&reply).await {
            warn!(chat_id = reply.chat_id, error = %e, "failed to send reply");
        }
    }
}
