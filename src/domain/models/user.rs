use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::friend_code::FriendCode};

pub type DisplayName = String;

/// Platform-assigned identity of a chat user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);
impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Platform-assigned identity of a group chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(i64);
impl GroupId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Sender of a chat message as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Sender {
    /// Username when set, otherwise first and last name joined by a space.
    pub fn display_name(&self) -> DisplayName {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => format!(
                "{} {}",
                self.first_name,
                self.last_name.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// A registered friend code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFriendCode {
    user_id: UserId,
    friend_code: FriendCode,
    display_name: DisplayName,
}

impl UserFriendCode {
    pub fn new(
        user_id: UserId,
        friend_code: FriendCode,
        display_name: DisplayName,
    ) -> Result<Self, DomainError> {
        if display_name.trim().is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }
        Ok(Self {
            user_id,
            friend_code,
            display_name,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
    pub fn friend_code(&self) -> FriendCode {
        self.friend_code
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
