use crate::domain::{
    error::DomainError,
    models::user::{GroupId, UserFriendCode},
    repositories::friend_code_repository::FriendCodeRepository,
};

pub struct ListGroupUsecase<F: FriendCodeRepository> {
    friend_code_repository: F,
}

impl<F: FriendCodeRepository> ListGroupUsecase<F> {
    pub fn new(friend_code_repository: F) -> Self {
        Self {
            friend_code_repository,
        }
    }

    pub async fn list(&self, group_id: GroupId) -> Result<Vec<UserFriendCode>, DomainError>
    where
        F: Send + Sync,
    {
        Ok(self.friend_code_repository.list_group_members(group_id).await?)
    }
}
