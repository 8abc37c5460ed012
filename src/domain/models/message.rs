use chrono::{DateTime, Utc};

use crate::domain::models::user::{GroupId, Sender, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn from_api(kind: &str) -> Option<Self> {
        match kind {
            "private" => Some(Self::Private),
            "group" => Some(Self::Group),
            "supergroup" => Some(Self::Supergroup),
            "channel" => Some(Self::Channel),
            _ => None,
        }
    }

    pub fn is_multi_user(&self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    /// Group identity used for visibility scoping.
    pub fn group_id(&self) -> GroupId {
        GroupId::new(self.id)
    }
}

/// Explicit bot command at the start of a message, e.g. `/sfc @name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arguments: String,
}

/// The message an incoming message replies to. `sender` is absent for
/// channel posts.
#[derive(Debug, Clone)]
pub struct RepliedMessage {
    pub sender: Option<Sender>,
}

/// Transport-neutral view of an inbound chat message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub sender: Sender,
    pub chat: Chat,
    pub reply_to: Option<RepliedMessage>,
    pub text: String,
    pub command: Option<Command>,
    pub date: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn command_arguments(&self) -> &str {
        self.command
            .as_ref()
            .map(|c| c.arguments.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
}

impl ParseMode {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
        }
    }
}

/// Outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: i64,
    pub reply_to_message_id: Option<i64>,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_notification: bool,
}

impl Reply {
    /// Quiet reply to the triggering message, used for handler results.
    pub fn quiet_to(message: &IncomingMessage, text: String, parse_mode: Option<ParseMode>) -> Self {
        Self {
            chat_id: message.chat.id,
            reply_to_message_id: Some(message.message_id),
            text,
            parse_mode,
            disable_notification: true,
        }
    }

    /// Plain reply carrying user-facing error text; notifications stay on.
    pub fn error_to(message: &IncomingMessage, text: &str) -> Self {
        Self {
            chat_id: message.chat.id,
            reply_to_message_id: Some(message.message_id),
            text: text.to_string(),
            parse_mode: None,
            disable_notification: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineQuery {
    pub id: String,
    pub from: UserId,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    pub id: String,
    pub from: UserId,
    pub data: Option<String>,
}

/// Single-article answer to an inline query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAnswer {
    pub inline_query_id: String,
    pub result_id: String,
    pub title: String,
    pub description: String,
    pub message_text: String,
    pub button: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum UpdateKind {
    Message(IncomingMessage),
    InlineQuery(InlineQuery),
    CallbackQuery(CallbackQuery),
    Other,
}

#[derive(Debug, Clone)]
pub struct InboundUpdate {
    pub update_id: i64,
    pub kind: UpdateKind,
}
