use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        friend_code::FriendCode,
        user::{GroupId, UserFriendCode, UserId},
    },
};

/// Repository for registration that writes the friend code and the group
/// membership atomically
#[async_trait]
pub trait UserRegistrationRepository {
    /// Upsert the user's friend code and grant visibility to `group_id` in a
    /// single transaction.
    ///
    /// Fails with [`RepositoryError::Conflict`] when `friend_code` already
    /// belongs to a different user.
    async fn register_in_group(
        &self,
        user_id: UserId,
        friend_code: FriendCode,
        display_name: &str,
        group_id: GroupId,
    ) -> Result<UserFriendCode, RepositoryError>;
}
