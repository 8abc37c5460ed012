use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};

use crate::domain::{
    error::RepositoryError,
    models::user::{GroupId, UserId},
    repositories::membership_repository::MembershipRepository,
};
use crate::infrastructure::entity::group_membership;

#[derive(Clone)]
pub struct SqliteMembershipRepository {
    db: DatabaseConnection,
}

impl SqliteMembershipRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MembershipRepository for SqliteMembershipRepository {
    async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, RepositoryError> {
        let membership = group_membership::Entity::find_by_id((group_id.as_i64(), user_id.as_i64()))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(membership.is_some())
    }

    async fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), RepositoryError> {
        let membership = group_membership::ActiveModel {
            group_id: Set(group_id.as_i64()),
            user_id: Set(user_id.as_i64()),
        };

        group_membership::Entity::insert(membership)
            .on_conflict(
                OnConflict::columns([
                    group_membership::Column::GroupId,
                    group_membership::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
