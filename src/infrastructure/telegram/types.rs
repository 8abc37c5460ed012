//! Serde types for the Telegram Bot API.
//!
//! Only the fields the bot reads are deserialized; unknown fields are
//! ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{
    message::{
        CallbackQuery as DomainCallbackQuery, Chat as DomainChat, ChatKind, Command,
        InboundUpdate, IncomingMessage, InlineQuery as DomainInlineQuery, RepliedMessage,
        UpdateKind,
    },
    user::{Sender, UserId},
};

/// Generic Telegram API response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub description: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub inline_query: Option<InlineQuery>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    /// Unix seconds.
    pub date: i64,
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    pub parse_mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InlineQueryResultArticle {
    #[serde(rename = "type")]
    pub result_type: &'static str,
    pub id: String,
    pub title: String,
    pub description: String,
    pub input_message_content: InputTextMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub username: Option<String>,
}

impl From<User> for Sender {
    fn from(user: User) -> Self {
        Self {
            id: UserId::new(user.id),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl Message {
    /// Bot command at offset 0, with any `@botname` suffix removed. Entity
    /// offsets are UTF-16 units; a leading command is ASCII so they line up
    /// with byte offsets there.
    fn command(&self) -> Option<Command> {
        let text = self.text.as_deref()?;
        let entity = self.entities.first()?;
        if entity.entity_type != "bot_command" || entity.offset != 0 {
            return None;
        }
        let raw = text.get(1..entity.length)?;
        let name = raw.split('@').next().unwrap_or(raw).to_string();
        let arguments = text
            .get(entity.length..)
            .unwrap_or_default()
            .trim_start()
            .to_string();
        Some(Command { name, arguments })
    }

    /// `None` for updates the bot has no use for (no sender, unknown chat kind).
    pub fn into_domain(self) -> Option<IncomingMessage> {
        let command = self.command();
        let kind = ChatKind::from_api(&self.chat.chat_type)?;
        let sender = Sender::from(self.from?);
        let reply_to = self.reply_to_message.map(|replied| RepliedMessage {
            sender: replied.from.map(Sender::from),
        });
        Some(IncomingMessage {
            message_id: self.message_id,
            sender,
            chat: DomainChat {
                id: self.chat.id,
                kind,
            },
            reply_to,
            text: self.text.unwrap_or_default(),
            command,
            date: DateTime::<Utc>::from_timestamp(self.date, 0).unwrap_or_default(),
        })
    }
}

impl From<Update> for InboundUpdate {
    fn from(update: Update) -> Self {
        let kind = if let Some(query) = update.inline_query {
            UpdateKind::InlineQuery(DomainInlineQuery {
                id: query.id,
                from: UserId::new(query.from.id),
                query: query.query,
            })
        } else if let Some(callback) = update.callback_query {
            UpdateKind::CallbackQuery(DomainCallbackQuery {
                id: callback.id,
                from: UserId::new(callback.from.id),
                data: callback.data,
            })
        } else if let Some(message) = update.message.and_then(Message::into_domain) {
            UpdateKind::Message(message)
        } else {
            UpdateKind::Other
        };

        Self {
            update_id: update.update_id,
            kind,
        }
    }
}
