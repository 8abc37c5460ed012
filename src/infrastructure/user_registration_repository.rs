use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
    sea_query::OnConflict,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        friend_code::FriendCode,
        user::{GroupId, UserFriendCode, UserId},
    },
    repositories::user_registration_repository::UserRegistrationRepository,
};
use crate::infrastructure::entity::{group_membership, user_friend_code};

#[derive(Clone)]
pub struct SqliteUserRegistrationRepository {
    db: DatabaseConnection,
}

impl SqliteUserRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRegistrationRepository for SqliteUserRegistrationRepository {
    async fn register_in_group(
        &self,
        user_id: UserId,
        friend_code: FriendCode,
        display_name: &str,
        group_id: GroupId,
    ) -> Result<UserFriendCode, RepositoryError> {
        let registered = UserFriendCode::new(user_id, friend_code, display_name.to_string())
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Begin transaction
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Upsert first so the write lock is taken before any read
        let friend_code_model = user_friend_code::ActiveModel {
            user_id: Set(user_id.as_i64()),
            friend_code: Set(friend_code.value()),
            display_name: Set(display_name.to_string()),
        };

        user_friend_code::Entity::insert(friend_code_model)
            .on_conflict(
                OnConflict::column(user_friend_code::Column::UserId)
                    .update_columns([
                        user_friend_code::Column::FriendCode,
                        user_friend_code::Column::DisplayName,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Same code owned by someone else
        let other_owner = user_friend_code::Entity::find()
            .filter(user_friend_code::Column::FriendCode.eq(friend_code.value()))
            .filter(user_friend_code::Column::UserId.ne(user_id.as_i64()))
            .one(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if other_owner.is_some() {
            txn.rollback()
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            return Err(RepositoryError::Conflict);
        }

        // Grant visibility in the current group
        let membership_model = group_membership::ActiveModel {
            group_id: Set(group_id.as_i64()),
            user_id: Set(user_id.as_i64()),
        };

        group_membership::Entity::insert(membership_model)
            .on_conflict(
                OnConflict::columns([
                    group_membership::Column::GroupId,
                    group_membership::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Commit transaction
        txn.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(registered)
    }
}
