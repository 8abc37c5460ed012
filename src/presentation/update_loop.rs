use std::{future::Future, sync::Arc, time::Duration};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        error::TransportError,
        models::message::{CallbackQuery, InboundUpdate, InlineQuery, UpdateKind},
        repositories::{
            friend_code_repository::FriendCodeRepository,
            membership_repository::MembershipRepository,
        },
        services::chat_transport::ChatTransport,
    },
    presentation::{dispatcher::Dispatcher, handlers::inline_handler::InlineAnswerHandler},
};

/// Pause after a failed `getUpdates` before polling again.
pub const POLL_ERROR_DELAY: Duration = Duration::from_secs(3);

/// Pulls updates and fans them out. Messages run on their own task;
/// inline and callback queries are answered in line.
pub struct UpdateLoop<F: FriendCodeRepository, M: MembershipRepository> {
    transport: Arc<dyn ChatTransport>,
    dispatcher: Arc<Dispatcher>,
    inline: InlineAnswerHandler<F, M>,
    poll_timeout: u64,
}

impl<F, M> UpdateLoop<F, M>
where
    F: FriendCodeRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
{
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        dispatcher: Arc<Dispatcher>,
        inline: InlineAnswerHandler<F, M>,
        poll_timeout: u64,
    ) -> Self {
        Self {
            transport,
            dispatcher,
            inline,
            poll_timeout,
        }
    }

    /// Acknowledge everything queued while the bot was down. Returns the
    /// offset to poll from next.
    pub async fn skip_backlog(&self) -> Result<Option<i64>, TransportError> {
        let mut offset = None;
        let mut skipped = 0usize;
        loop {
            let updates = self.transport.get_updates(offset, 0).await?;
            let Some(last) = updates.last() else {
                break;
            };
            offset = Some(last.update_id + 1);
            skipped += updates.len();
        }
        if skipped > 0 {
            info!(skipped, "skipped pending updates");
        }
        Ok(offset)
    }

    /// Poll until `shutdown` resolves.
    pub async fn run(&self, mut offset: Option<i64>, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        info!(poll_timeout = self.poll_timeout, "update loop started");

        loop {
            let updates = tokio::select! {
                result = self.transport.get_updates(offset, self.poll_timeout) => result,
                _ = &mut shutdown => {
                    info!("update loop stopped");
                    return;
                }
            };

            match updates {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        self.handle_update(update).await;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "getUpdates failed");
                    tokio::select! {
                        _ = tokio::time::sleep(POLL_ERROR_DELAY) => {}
                        _ = &mut shutdown => {
                            info!("update loop stopped");
                            return;
                        }
                    }
                }
            }
        }
    }

    pub async fn handle_update(&self, update: InboundUpdate) {
        match update.kind {
            UpdateKind::Message(message) => {
                let dispatcher = self.dispatcher.clone();
                tokio::spawn(async move {
                    dispatcher.dispatch(message, Utc::now()).await;
                });
            }
            UpdateKind::InlineQuery(query) => self.answer_inline(query).await,
            UpdateKind::CallbackQuery(callback) => self.acknowledge(callback).await,
            UpdateKind::Other => {
                debug!(update_id = update.update_id, "ignoring update");
            }
        }
    }

    async fn answer_inline(&self, query: InlineQuery) {
        match self.inline.answer(&query).await {
            Ok(Some(answer)) => {
                if let Err(e) = self.transport.answer_inline_query(&answer).await {
                    warn!(error = %e, "failed to answer inline query");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(user_id = query.from.as_i64(), error = %e, "inline query failed"),
        }
    }

    async fn acknowledge(&self, callback: CallbackQuery) {
        debug!(
            user_id = callback.from.as_i64(),
            data = callback.data.as_deref().unwrap_or_default(),
            "callback query"
        );
        if let Err(e) = self.transport.answer_callback_query(&callback.id, None).await {
            warn!(error = %e, "failed to answer callback query");
        }
    }
}
