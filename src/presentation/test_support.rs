//! Message builders and a recording transport for presentation tests.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::{
    domain::{
        error::TransportError,
        models::{
            message::{
                Chat, ChatKind, Command, InboundUpdate, IncomingMessage, InlineAnswer, RepliedMessage,
                Reply,
            },
            user::Sender,
        },
        services::chat_transport::ChatTransport,
    },
    usecase::test_support::sender,
};

pub fn message_in(kind: ChatKind, user_id: i64, username: &str, text: &str) -> IncomingMessage {
    let chat_id = match kind {
        ChatKind::Private => user_id,
        _ => -10,
    };
    let mut message = group_message(chat_id, user_id, username, text);
    message.chat.kind = kind;
    message
}

/// Message in a plain group, parsed the way the transport would.
pub fn group_message(group_id: i64, user_id: i64, username: &str, text: &str) -> IncomingMessage {
    let command = text.strip_prefix('/').map(|rest| {
        let (head, arguments) = rest.split_once(' ').unwrap_or((rest, ""));
        let name = head.split('@').next().unwrap_or(head);
        Command {
            name: name.to_string(),
            arguments: arguments.trim_start().to_string(),
        }
    });

    IncomingMessage {
        message_id: 100,
        sender: sender(user_id, username),
        chat: Chat {
            id: group_id,
            kind: ChatKind::Group,
        },
        reply_to: None,
        text: text.to_string(),
        command,
        date: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
    }
}

pub fn reply_to(mut message: IncomingMessage, user_id: i64, username: &str) -> IncomingMessage {
    let target: Sender = sender(user_id, username);
    message.reply_to = Some(RepliedMessage {
        sender: Some(target),
    });
    message
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Reply>>,
    inline_answers: Mutex<Vec<InlineAnswer>>,
    callback_acks: Mutex<Vec<String>>,
    offsets: Mutex<Vec<Option<i64>>>,
    batches: Mutex<VecDeque<Vec<InboundUpdate>>>,
}

impl RecordingTransport {
    pub fn with_batches(batches: Vec<Vec<InboundUpdate>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }

    pub fn inline_answers(&self) -> Vec<InlineAnswer> {
        self.inline_answers.lock().unwrap().clone()
    }

    pub fn callback_acks(&self) -> Vec<String> {
        self.callback_acks.lock().unwrap().clone()
    }

    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn get_me(&self) -> Result<String, TransportError> {
        Ok("fcbot".to_string())
    }

    /// Serves scripted batches, then empty polls.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        _timeout_secs: u64,
    ) -> Result<Vec<InboundUpdate>, TransportError> {
        self.offsets.lock().unwrap().push(offset);
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => Ok(batch),
            None => {
                tokio::task::yield_now().await;
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(&self, reply: &Reply) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(reply.clone());
        Ok(())
    }

    async fn answer_inline_query(&self, answer: &InlineAnswer) -> Result<(), TransportError> {
        self.inline_answers.lock().unwrap().push(answer.clone());
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        _text: Option<&str>,
    ) -> Result<(), TransportError> {
        self.callback_acks
            .lock()
            .unwrap()
            .push(callback_query_id.to_string());
        Ok(())
    }
}
