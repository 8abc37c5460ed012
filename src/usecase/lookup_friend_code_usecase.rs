use crate::domain::{
    error::DomainError,
    models::user::{GroupId, UserFriendCode, UserId},
    repositories::{
        friend_code_repository::FriendCodeRepository, membership_repository::MembershipRepository,
    },
};

/// Result of looking up one's own code from inside a group.
#[derive(Debug)]
pub struct SelfLookup {
    pub record: UserFriendCode,
    /// The group could not see the code before this lookup.
    pub newly_visible: bool,
}

pub struct LookupFriendCodeUsecase<F: FriendCodeRepository, M: MembershipRepository> {
    friend_code_repository: F,
    membership_repository: M,
}

impl<F: FriendCodeRepository, M: MembershipRepository> LookupFriendCodeUsecase<F, M> {
    pub fn new(friend_code_repository: F, membership_repository: M) -> Self {
        Self {
            friend_code_repository,
            membership_repository,
        }
    }

    /// Group-less lookup; never touches memberships.
    pub async fn lookup(&self, user_id: UserId) -> Result<UserFriendCode, DomainError>
    where
        F: Send + Sync,
        M: Send + Sync,
    {
        self.friend_code_repository
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::NotRegistered)
    }

    /// Own code, opting `group_id` in on first use.
    pub async fn lookup_self(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<SelfLookup, DomainError>
    where
        F: Send + Sync,
        M: Send + Sync,
    {
        let record = self.lookup(user_id).await?;

        let newly_visible = if self.membership_repository.is_member(group_id, user_id).await? {
            false
        } else {
            self.membership_repository
                .add_member(group_id, user_id)
                .await?;
            true
        };

        Ok(SelfLookup {
            record,
            newly_visible,
        })
    }

    /// Someone else's code, provided it is visible in `group_id`.
    pub async fn lookup_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<UserFriendCode, DomainError>
    where
        F: Send + Sync,
        M: Send + Sync,
    {
        let record = self.lookup(user_id).await?;
        self.ensure_visible(group_id, record).await
    }

    pub async fn lookup_member_by_name(
        &self,
        group_id: GroupId,
        display_name: &str,
    ) -> Result<UserFriendCode, DomainError>
    where
        F: Send + Sync,
        M: Send + Sync,
    {
        let record = self
            .friend_code_repository
            .find_by_display_name(display_name)
            .await?
            .ok_or(DomainError::NotRegistered)?;
        self.ensure_visible(group_id, record).await
    }

    async fn ensure_visible(
        &self,
        group_id: GroupId,
        record: UserFriendCode,
    ) -> Result<UserFriendCode, DomainError>
    where
        F: Send + Sync,
        M: Send + Sync,
    {
        if self
            .membership_repository
            .is_member(group_id, record.user_id())
            .await?
        {
            Ok(record)
        } else {
            Err(DomainError::NotInGroup)
        }
    }
}
