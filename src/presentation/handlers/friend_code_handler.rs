use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        error::{CommandError, DomainError, RepositoryError},
        models::message::{IncomingMessage, ParseMode, Reply},
        repositories::{
            friend_code_repository::FriendCodeRepository,
            membership_repository::MembershipRepository,
            user_registration_repository::UserRegistrationRepository,
        },
    },
    presentation::{
        handlers::CommandHandler,
        render::{self, mention_line, member_list},
    },
    usecase::{
        list_group_usecase::ListGroupUsecase, lookup_friend_code_usecase::LookupFriendCodeUsecase,
        register_friend_code_usecase::RegisterFriendCodeUsecase,
    },
};

/// Shortest text that can still carry a code after the command.
const MIN_REGISTER_LEN: usize = 8;

/// Not-found outcomes when looking up someone else.
fn lookup_error(command: &str, e: DomainError) -> CommandError {
    match e {
        DomainError::NotRegistered => CommandError::user_facing(
            format!("{command}: target has no friend code"),
            render::TARGET_NOT_REGISTERED,
        ),
        DomainError::NotInGroup => CommandError::user_facing(
            format!("{command}: target not visible in this group"),
            render::TARGET_NOT_IN_GROUP,
        ),
        other => CommandError::diagnostic(format!("{command}: {other}")),
    }
}

// addfc

pub struct RegisterHandler<R: UserRegistrationRepository> {
    usecase: RegisterFriendCodeUsecase<R>,
}

impl<R: UserRegistrationRepository> RegisterHandler<R> {
    pub fn new(usecase: RegisterFriendCodeUsecase<R>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl<R: UserRegistrationRepository + Send + Sync> CommandHandler for RegisterHandler<R> {
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        if message.text.len() < MIN_REGISTER_LEN {
            return Err(CommandError::diagnostic("addfc: message too short"));
        }

        let Some((_, raw_code)) = message.text.split_once(' ') else {
            return Err(CommandError::user_facing(
                format!("addfc: no argument in {:?}", message.text),
                render::FORMAT_GUIDANCE,
            ));
        };

        match self
            .usecase
            .register(&message.sender, message.chat.group_id(), raw_code.trim())
            .await
        {
            Ok(_) => Ok(Some(Reply::quiet_to(
                message,
                render::REGISTERED.to_string(),
                None,
            ))),
            Err(DomainError::InvalidFriendCode(input)) => Err(CommandError::user_facing(
                format!("addfc: unacceptable friend code format: {input}"),
                render::FORMAT_GUIDANCE,
            )),
            Err(DomainError::Repository(RepositoryError::Conflict)) => {
                Err(CommandError::user_facing(
                    "addfc: friend code already registered by another user",
                    render::ALREADY_REGISTERED,
                ))
            }
            Err(e) => Err(CommandError::user_facing(
                format!("addfc: {e}"),
                render::RETRY,
            )),
        }
    }
}

// fc

pub struct LookupByReplyHandler<F: FriendCodeRepository, M: MembershipRepository> {
    usecase: Arc<LookupFriendCodeUsecase<F, M>>,
}

impl<F: FriendCodeRepository, M: MembershipRepository> LookupByReplyHandler<F, M> {
    pub fn new(usecase: Arc<LookupFriendCodeUsecase<F, M>>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl<F, M> CommandHandler for LookupByReplyHandler<F, M>
where
    F: FriendCodeRepository + Send + Sync,
    M: MembershipRepository + Send + Sync,
{
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        let Some(replied) = &message.reply_to else {
            return Err(CommandError::diagnostic("fc: not a reply to any message"));
        };
        let Some(target) = &replied.sender else {
            return Err(CommandError::diagnostic("fc: replied-to message has no sender"));
        };

        let record = self
            .usecase
            .lookup_member(message.chat.group_id(), target.id)
            .await
            .map_err(|e| lookup_error("fc", e))?;

        Ok(Some(Reply::quiet_to(
            message,
            mention_line(&record),
            Some(ParseMode::Markdown),
        )))
    }
}

// myfc

pub struct LookupSelfHandler<F: FriendCodeRepository, M: MembershipRepository> {
    usecase: Arc<LookupFriendCodeUsecase<F, M>>,
}

impl<F: FriendCodeRepository, M: MembershipRepository> LookupSelfHandler<F, M> {
    pub fn new(usecase: Arc<LookupFriendCodeUsecase<F, M>>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl<F, M> CommandHandler for LookupSelfHandler<F, M>
where
    F: FriendCodeRepository + Send + Sync,
    M: MembershipRepository + Send + Sync,
{
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        let lookup = self
            .usecase
            .lookup_self(message.chat.group_id(), message.sender.id)
            .await
            .map_err(|e| match e {
                DomainError::NotRegistered => CommandError::user_facing(
                    "myfc: caller has no friend code",
                    render::SELF_NOT_REGISTERED,
                ),
                other => CommandError::diagnostic(format!("myfc: {other}")),
            })?;

        let mut text = mention_line(&lookup.record);
        if lookup.newly_visible {
            text.push('\n');
            text.push_str(render::VISIBILITY_GRANTED);
        }

        Ok(Some(Reply::quiet_to(message, text, Some(ParseMode::Markdown))))
    }
}

// sfc

pub struct LookupByNameHandler<F: FriendCodeRepository, M: MembershipRepository> {
    usecase: Arc<LookupFriendCodeUsecase<F, M>>,
}

impl<F: FriendCodeRepository, M: MembershipRepository> LookupByNameHandler<F, M> {
    pub fn new(usecase: Arc<LookupFriendCodeUsecase<F, M>>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl<F, M> CommandHandler for LookupByNameHandler<F, M>
where
    F: FriendCodeRepository + Send + Sync,
    M: MembershipRepository + Send + Sync,
{
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        // Drop the leading delimiter, usually '@'
        let mut chars = message.command_arguments().trim().chars();
        chars.next();
        let name = chars.as_str();
        if name.is_empty() {
            return Ok(None);
        }

        let record = self
            .usecase
            .lookup_member_by_name(message.chat.group_id(), name)
            .await
            .map_err(|e| lookup_error("sfc", e))?;

        Ok(Some(Reply::quiet_to(
            message,
            mention_line(&record),
            Some(ParseMode::Markdown),
        )))
    }
}

// fclist

pub struct ListGroupHandler<F: FriendCodeRepository> {
    usecase: ListGroupUsecase<F>,
}

impl<F: FriendCodeRepository> ListGroupHandler<F> {
    pub fn new(usecase: ListGroupUsecase<F>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl<F: FriendCodeRepository + Send + Sync> CommandHandler for ListGroupHandler<F> {
    async fn handle(&self, message: &IncomingMessage) -> Result<Option<Reply>, CommandError> {
        let members = self
            .usecase
            .list(message.chat.group_id())
            .await
            .map_err(|e| CommandError::diagnostic(format!("fclist: {e}")))?;

        Ok(Some(Reply::quiet_to(
            message,
            member_list(&members),
            Some(ParseMode::Markdown),
        )))
    }
}
