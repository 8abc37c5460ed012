use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid friend code: {0}")]
    InvalidFriendCode(String),

    #[error("Empty display name")]
    EmptyDisplayName,

    #[error("User has not registered a friend code")]
    NotRegistered,

    #[error("User has not shared a friend code in this group")]
    NotInGroup,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Friend code already registered by another user")]
    Conflict,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Failure of a command handler.
///
/// `Diagnostic` is only logged. `UserFacing` is logged and its `reply_text`
/// is sent back to the chat.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Diagnostic(String),

    #[error("{diagnostic}")]
    UserFacing {
        diagnostic: String,
        reply_text: String,
    },
}

impl CommandError {
    pub fn diagnostic(diagnostic: impl Into<String>) -> Self {
        Self::Diagnostic(diagnostic.into())
    }

    pub fn user_facing(diagnostic: impl Into<String>, reply_text: impl Into<String>) -> Self {
        Self::UserFacing {
            diagnostic: diagnostic.into(),
            reply_text: reply_text.into(),
        }
    }

    pub fn reply_text(&self) -> Option<&str> {
        match self {
            Self::Diagnostic(_) => None,
            Self::UserFacing { reply_text, .. } => Some(reply_text),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Bot API error: {0}")]
    Api(String),
}
