use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{GroupId, UserFriendCode, UserId},
};

#[async_trait]
pub trait FriendCodeRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserFriendCode>, RepositoryError>;
    /// Exact match on the stored display name.
    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<UserFriendCode>, RepositoryError>;
    async fn list_group_members(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<UserFriendCode>, RepositoryError>;
}
