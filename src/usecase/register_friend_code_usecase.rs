use crate::domain::{
    error::DomainError,
    models::{
        friend_code::FriendCode,
        user::{GroupId, Sender, UserFriendCode},
    },
    repositories::user_registration_repository::UserRegistrationRepository,
};

pub struct RegisterFriendCodeUsecase<R: UserRegistrationRepository> {
    registration_repository: R,
}

impl<R: UserRegistrationRepository> RegisterFriendCodeUsecase<R> {
    pub fn new(registration_repository: R) -> Self {
        Self {
            registration_repository,
        }
    }

    /// Parse `raw_code`, then upsert the sender's code and make it visible
    /// in `group_id`.
    pub async fn register(
        &self,
        sender: &Sender,
        group_id: GroupId,
        raw_code: &str,
    ) -> Result<UserFriendCode, DomainError>
    where
        R: Send + Sync,
    {
        let friend_code = FriendCode::parse(raw_code)?;
        let display_name = sender.display_name();

        let registered = self
            .registration_repository
            .register_in_group(sender.id, friend_code, &display_name, group_id)
            .await?;

        Ok(registered)
    }
}
