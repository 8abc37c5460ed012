use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{GroupId, UserId},
};

#[async_trait]
pub trait MembershipRepository {
    async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, RepositoryError>;
    /// Grant visibility. Adding an existing membership is not an error.
    async fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), RepositoryError>;
}
