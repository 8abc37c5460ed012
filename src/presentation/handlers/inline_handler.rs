use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{
        error::{CommandError, DomainError},
        models::message::{InlineAnswer, InlineQuery},
        repositories::{
            friend_code_repository::FriendCodeRepository,
            membership_repository::MembershipRepository,
        },
    },
    presentation::render::{self, mention_line},
    usecase::lookup_friend_code_usecase::LookupFriendCodeUsecase,
};

/// Inline query text that asks for one's own code.
pub const MY_FC_QUERY: &str = "myFC";
pub const LIKE_CALLBACK: &str = "like";
const LIKE_LABEL: &str = "👍";
const ARTICLE_TITLE: &str = "MyFC";

/// Answers `@bot myFC` outside of any group. Read-only.
pub struct InlineAnswerHandler<F: FriendCodeRepository, M: MembershipRepository> {
    usecase: Arc<LookupFriendCodeUsecase<F, M>>,
}

impl<F, M> InlineAnswerHandler<F, M>
where
    F: FriendCodeRepository + Send + Sync,
    M: MembershipRepository + Send + Sync,
{
    pub fn new(usecase: Arc<LookupFriendCodeUsecase<F, M>>) -> Self {
        Self { usecase }
    }

    pub async fn answer(&self, query: &InlineQuery) -> Result<Option<InlineAnswer>, CommandError> {
        if query.query != MY_FC_QUERY {
            return Ok(None);
        }

        let message_text = match self.usecase.lookup(query.from).await {
            Ok(record) => mention_line(&record),
            Err(DomainError::NotRegistered) => render::SELF_NOT_REGISTERED.to_string(),
            Err(e) => return Err(CommandError::diagnostic(format!("inline myFC: {e}"))),
        };

        Ok(Some(InlineAnswer {
            inline_query_id: query.id.clone(),
            result_id: Uuid::new_v4().to_string(),
            title: ARTICLE_TITLE.to_string(),
            description: query.query.clone(),
            message_text,
            button: Some((LIKE_LABEL.to_string(), LIKE_CALLBACK.to_string())),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::models::user::UserId, usecase::test_support::InMemoryRegistry};

    fn handler(registry: &InMemoryRegistry) -> InlineAnswerHandler<InMemoryRegistry, InMemoryRegistry> {
        InlineAnswerHandler::new(Arc::new(LookupFriendCodeUsecase::new(
            registry.clone(),
            registry.clone(),
        )))
    }

    fn query(from: i64, text: &str) -> InlineQuery {
        InlineQuery {
            id: "iq-1".to_string(),
            from: UserId::new(from),
            query: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_answers_registered_user_without_touching_groups() {
        let registry = InMemoryRegistry::default();
        registry.seed(1, 123456789012, "alice", &[]);

        let answer = handler(&registry).answer(&query(1, "myFC")).await.unwrap().unwrap();

        assert_eq!(answer.inline_query_id, "iq-1");
        assert_eq!(answer.message_text, "[alice](tg://user?id=1): SW-1234-5678-9012");
        assert_eq!(answer.description, "myFC");
        assert_eq!(registry.membership_count(), 0);
    }

    #[tokio::test]
    async fn test_unregistered_user_gets_guidance_card() {
        let registry = InMemoryRegistry::default();

        let answer = handler(&registry).answer(&query(1, "myFC")).await.unwrap().unwrap();

        assert_eq!(answer.message_text, render::SELF_NOT_REGISTERED);
    }

    #[tokio::test]
    async fn test_other_queries_are_ignored() {
        let registry = InMemoryRegistry::default();
        registry.seed(1, 123456789012, "alice", &[]);

        assert!(handler(&registry).answer(&query(1, "myfc")).await.unwrap().is_none());
        assert!(handler(&registry).answer(&query(1, "")).await.unwrap().is_none());
    }
}
