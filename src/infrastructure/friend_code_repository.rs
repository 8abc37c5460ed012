use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        friend_code::FriendCode,
        user::{GroupId, UserFriendCode, UserId},
    },
    repositories::friend_code_repository::FriendCodeRepository,
};
use crate::infrastructure::entity::{group_membership, user_friend_code};

#[derive(Clone)]
pub struct SqliteFriendCodeRepository {
    db: DatabaseConnection,
}

impl SqliteFriendCodeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: user_friend_code::Model) -> Result<UserFriendCode, RepositoryError> {
    let friend_code = FriendCode::new(model.friend_code)
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
    UserFriendCode::new(UserId::new(model.user_id), friend_code, model.display_name)
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl FriendCodeRepository for SqliteFriendCodeRepository {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserFriendCode>, RepositoryError> {
        let model = user_friend_code::Entity::find_by_id(user_id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<UserFriendCode>, RepositoryError> {
        let model = user_friend_code::Entity::find()
            .filter(user_friend_code::Column::DisplayName.eq(display_name))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list_group_members(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<UserFriendCode>, RepositoryError> {
        let models = user_friend_code::Entity::find()
            .join(
                JoinType::InnerJoin,
                user_friend_code::Relation::GroupMembership.def(),
            )
            .filter(group_membership::Column::GroupId.eq(group_id.as_i64()))
            .order_by_asc(user_friend_code::Column::DisplayName)
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }
}
