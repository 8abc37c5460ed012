//! In-memory stand-ins for the repositories, shared by usecase and
//! presentation tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        friend_code::FriendCode,
        user::{GroupId, Sender, UserFriendCode, UserId},
    },
    repositories::{
        friend_code_repository::FriendCodeRepository, membership_repository::MembershipRepository,
        user_registration_repository::UserRegistrationRepository,
    },
};

#[derive(Default)]
struct Tables {
    // user_id -> (friend_code, display_name)
    codes: BTreeMap<i64, (i64, String)>,
    // (group_id, user_id)
    memberships: BTreeSet<(i64, i64)>,
}

#[derive(Clone, Default)]
pub struct InMemoryRegistry {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRegistry {
    pub fn seed(&self, user_id: i64, code: i64, name: &str, groups: &[i64]) {
        let mut tables = self.tables.lock().unwrap();
        tables.codes.insert(user_id, (code, name.to_string()));
        for group in groups {
            tables.memberships.insert((*group, user_id));
        }
    }

    pub fn has_membership(&self, group_id: i64, user_id: i64) -> bool {
        self.tables
            .lock()
            .unwrap()
            .memberships
            .contains(&(group_id, user_id))
    }

    pub fn membership_count(&self) -> usize {
        self.tables.lock().unwrap().memberships.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().codes.len()
    }
}

fn record(user_id: i64, code: i64, name: &str) -> UserFriendCode {
    UserFriendCode::new(
        UserId::new(user_id),
        FriendCode::new(code).unwrap(),
        name.to_string(),
    )
    .unwrap()
}

#[async_trait]
impl FriendCodeRepository for InMemoryRegistry {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<UserFriendCode>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .codes
            .get(&user_id.as_i64())
            .map(|(code, name)| record(user_id.as_i64(), *code, name)))
    }

    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<UserFriendCode>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .codes
            .iter()
            .find(|(_, (_, name))| name == display_name)
            .map(|(id, (code, name))| record(*id, *code, name)))
    }

    async fn list_group_members(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<UserFriendCode>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut members: Vec<UserFriendCode> = tables
            .memberships
            .iter()
            .filter(|(group, _)| *group == group_id.as_i64())
            .filter_map(|(_, user)| tables.codes.get(user).map(|(code, name)| record(*user, *code, name)))
            .collect();
        members.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        Ok(members)
    }
}

#[async_trait]
impl MembershipRepository for InMemoryRegistry {
    async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.has_membership(group_id.as_i64(), user_id.as_i64()))
    }

    async fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .unwrap()
            .memberships
            .insert((group_id.as_i64(), user_id.as_i64()));
        Ok(())
    }
}

#[async_trait]
impl UserRegistrationRepository for InMemoryRegistry {
    async fn register_in_group(
        &self,
        user_id: UserId,
        friend_code: FriendCode,
        display_name: &str,
        group_id: GroupId,
    ) -> Result<UserFriendCode, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let taken = tables
            .codes
            .iter()
            .any(|(id, (code, _))| *code == friend_code.value() && *id != user_id.as_i64());
        if taken {
            return Err(RepositoryError::Conflict);
        }
        tables
            .codes
            .insert(user_id.as_i64(), (friend_code.value(), display_name.to_string()));
        tables
            .memberships
            .insert((group_id.as_i64(), user_id.as_i64()));
        Ok(record(user_id.as_i64(), friend_code.value(), display_name))
    }
}

/// Registration repository whose storage is always down.
#[derive(Clone)]
pub struct BrokenRegistry;

#[async_trait]
impl UserRegistrationRepository for BrokenRegistry {
    async fn register_in_group(
        &self,
        _user_id: UserId,
        _friend_code: FriendCode,
        _display_name: &str,
        _group_id: GroupId,
    ) -> Result<UserFriendCode, RepositoryError> {
        Err(RepositoryError::DatabaseError("database is locked".to_string()))
    }
}

pub fn sender(id: i64, username: &str) -> Sender {
    Sender {
        id: UserId::new(id),
        username: Some(username.to_string()),
        first_name: username.to_string(),
        last_name: None,
    }
}
