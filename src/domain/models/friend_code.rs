use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Accepts an optional `SW-` prefix (any case) followed by either twelve
/// digits or three hyphen separated groups of four.
static FRIEND_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[sS][wW]-)?(\d{12}|\d{4}-\d{4}-\d{4})$").expect("friend code pattern is valid")
});

const GROUP: i64 = 10_000;

/// Value object for a 12-digit friend code stored without separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FriendCode(i64);

impl FriendCode {
    pub const UPPER_BOUND: i64 = 1_000_000_000_000;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(0..Self::UPPER_BOUND).contains(&value) {
            return Err(DomainError::InvalidFriendCode(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parse user input such as `SW-1234-5678-9012` or `123456789012`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let captures = FRIEND_CODE_PATTERN
            .captures(input.trim())
            .ok_or_else(|| DomainError::InvalidFriendCode(input.to_string()))?;
        let digits = captures[1].replace('-', "");
        let value = digits
            .parse::<i64>()
            .map_err(|_| DomainError::InvalidFriendCode(input.to_string()))?;
        Self::new(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FriendCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "SW-{:04}-{:04}-{:04}",
            v / (GROUP * GROUP) % GROUP,
            v / GROUP % GROUP,
            v % GROUP
        )
    }
}
