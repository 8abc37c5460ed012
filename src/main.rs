mod config;
mod domain;
mod infrastructure;
mod logging;
mod presentation;
mod usecase;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::{Config, ConfigError},
    domain::{error::TransportError, services::chat_transport::ChatTransport},
    infrastructure::{
        database,
        friend_code_repository::SqliteFriendCodeRepository,
        membership_repository::SqliteMembershipRepository,
        telegram::{
            TelegramApi,
            proxy::{self, ProxyError},
        },
        user_registration_repository::SqliteUserRegistrationRepository,
    },
    presentation::{
        dispatcher::{self, Dispatcher},
        handlers::{
            friend_code_handler::{
                ListGroupHandler, LookupByNameHandler, LookupByReplyHandler, LookupSelfHandler,
                RegisterHandler,
            },
            inline_handler::InlineAnswerHandler,
        },
        update_loop::UpdateLoop,
    },
    usecase::{
        list_group_usecase::ListGroupUsecase, lookup_friend_code_usecase::LookupFriendCodeUsecase,
        register_friend_code_usecase::RegisterFriendCodeUsecase,
    },
};

type SqliteLookup = LookupFriendCodeUsecase<SqliteFriendCodeRepository, SqliteMembershipRepository>;

#[derive(Debug, Error)]
enum BootstrapError {
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Bind every command name to its handler over the SQLite registry.
fn build_dispatcher(
    db: &DatabaseConnection,
    lookup: Arc<SqliteLookup>,
    transport: Arc<dyn ChatTransport>,
) -> Dispatcher {
    let registration_repository = SqliteUserRegistrationRepository::new(db.clone());
    let friend_code_repository = SqliteFriendCodeRepository::new(db.clone());

    Dispatcher::new(transport)
        .with_handler(
            dispatcher::ADD_FC,
            RegisterHandler::new(RegisterFriendCodeUsecase::new(registration_repository)),
        )
        .with_handler(dispatcher::MY_FC, LookupSelfHandler::new(lookup.clone()))
        .with_handler(dispatcher::FC, LookupByReplyHandler::new(lookup.clone()))
        .with_handler(dispatcher::SEARCH_FC, LookupByNameHandler::new(lookup))
        .with_handler(
            dispatcher::FC_LIST,
            ListGroupHandler::new(ListGroupUsecase::new(friend_code_repository)),
        )
}

fn build_lookup(db: &DatabaseConnection) -> Arc<SqliteLookup> {
    Arc::new(LookupFriendCodeUsecase::new(
        SqliteFriendCodeRepository::new(db.clone()),
        SqliteMembershipRepository::new(db.clone()),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), BootstrapError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let config = Config::from_file(Config::default_path()?)?;
    logging::init(config.telegram.debug);

    let db = database::connect(
        &config.database.db_name,
        config.database.max_connections,
        config.telegram.debug,
    )
    .await?;
    database::create_schema(&db).await?;
    info!(db_name = %config.database.db_name.display(), "schema ready");

    let client = proxy::build_client(config.proxy()).await?;
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramApi::new(
        client,
        &config.telegram.token,
        config.telegram.debug,
    ));
    let username = transport.get_me().await?;
    info!(username = %username, "authorized on account");

    let lookup = build_lookup(&db);
    let dispatcher = Arc::new(build_dispatcher(&db, lookup.clone(), transport.clone()));
    let updates = UpdateLoop::new(
        transport,
        dispatcher,
        InlineAnswerHandler::new(lookup),
        config.telegram.update_timeout,
    );

    let offset = updates.skip_backlog().await?;
    updates.run(offset, shutdown_signal()).await;

    db.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::{message::InlineQuery, user::UserId},
        infrastructure::database::test_support::{drop_file_db, file_db, memory_db},
        presentation::{
            render,
            test_support::{RecordingTransport, group_message, reply_to},
        },
    };

    const GROUP: i64 = -1001;
    const OTHER_GROUP: i64 = -1002;

    struct TestApp {
        db: DatabaseConnection,
        transport: Arc<RecordingTransport>,
        dispatcher: Dispatcher,
    }

    #[fixture]
    async fn test_app() -> TestApp {
        let db = memory_db().await;
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = build_dispatcher(&db, build_lookup(&db), transport.clone());
        TestApp {
            db,
            transport,
            dispatcher,
        }
    }

    /// Send `text` as `user` in `group` and return what the bot replied.
    async fn say(app: &TestApp, group: i64, user: i64, name: &str, text: &str) -> Option<String> {
        let message = group_message(group, user, name, text);
        app.dispatcher
            .process(&message, message.date)
            .await
            .map(|reply| reply.text)
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_and_lookup_roundtrip(#[future] test_app: TestApp) {
        let app = test_app.await;

        let done = say(&app, GROUP, 1, "alice", "/addfc 123456789012").await;
        assert_eq!(done.as_deref(), Some(render::REGISTERED));

        let own = say(&app, GROUP, 1, "alice", "/myfc").await.unwrap();
        assert_eq!(own, "[alice](tg://user?id=1): SW-1234-5678-9012");

        let by_name = say(&app, GROUP, 2, "bob", "/sfc @alice").await.unwrap();
        assert_eq!(by_name, own);

        let list = say(&app, GROUP, 2, "bob", "/fclist").await.unwrap();
        assert_eq!(list, own);
    }

    #[rstest]
    #[tokio::test]
    async fn test_visibility_is_per_group(#[future] test_app: TestApp) {
        let app = test_app.await;
        say(&app, GROUP, 1, "alice", "/addfc SW-1234-5678-9012").await;

        let hidden = say(&app, OTHER_GROUP, 2, "bob", "/sfc @alice").await;
        assert_eq!(hidden.as_deref(), Some(render::TARGET_NOT_IN_GROUP));
        let empty = say(&app, OTHER_GROUP, 2, "bob", "/fclist").await;
        assert_eq!(empty.as_deref(), Some(""));

        let granted = say(&app, OTHER_GROUP, 1, "alice", "/myfc").await.unwrap();
        assert!(granted.ends_with(render::VISIBILITY_GRANTED));

        let message = reply_to(group_message(OTHER_GROUP, 2, "bob", "/fc"), 1, "alice");
        let visible = app.dispatcher.process(&message, message.date).await.unwrap();
        assert_eq!(visible.text, "[alice](tg://user?id=1): SW-1234-5678-9012");
    }

    #[rstest]
    #[tokio::test]
    async fn test_reregistration_updates_code_and_name(#[future] test_app: TestApp) {
        let app = test_app.await;
        say(&app, GROUP, 1, "alice", "/addfc 111111111111").await;
        say(&app, GROUP, 1, "alicia", "/addfc 1234-5678-9012").await;

        let list = say(&app, GROUP, 2, "bob", "/fclist").await.unwrap();

        assert_eq!(list, "[alicia](tg://user?id=1): SW-1234-5678-9012");
    }

    #[rstest]
    #[tokio::test]
    async fn test_concurrent_register_and_self_lookup(#[future] test_app: TestApp) {
        let app = test_app.await;
        let register = group_message(GROUP, 1, "alice", "/addfc 123456789012");
        let lookup = group_message(GROUP, 1, "alice", "/myfc");

        let (_, looked_up) = tokio::join!(
            app.dispatcher.process(&register, register.date),
            app.dispatcher.process(&lookup, lookup.date),
        );

        // Either before the registration or after it, never in between
        let text = looked_up.unwrap().text;
        assert!(
            text == render::SELF_NOT_REGISTERED
                || text == "[alice](tg://user?id=1): SW-1234-5678-9012",
            "unexpected reply: {text}"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_register_and_self_lookup_on_pooled_file_db() {
        let (db, path) = file_db("register-vs-myfc").await;
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = Arc::new(build_dispatcher(&db, build_lookup(&db), transport));

        let mut registers = Vec::new();
        let mut lookups = Vec::new();
        for user in 1..=20i64 {
            let name = format!("user{user}");
            let register = group_message(GROUP, user, &name, &format!("/addfc {:012}", user * 1_111));
            let lookup = group_message(GROUP, user, &name, "/myfc");

            let d = dispatcher.clone();
            registers.push(tokio::spawn(async move { d.process(&register, register.date).await }));
            let d = dispatcher.clone();
            lookups.push((
                user,
                tokio::spawn(async move { d.process(&lookup, lookup.date).await }),
            ));
        }

        for (user, task) in lookups {
            let text = task.await.unwrap().unwrap().text;
            let complete = format!(
                "[user{user}](tg://user?id={user}): {}",
                crate::domain::models::friend_code::FriendCode::new(user * 1_111).unwrap()
            );
            assert!(
                text == render::SELF_NOT_REGISTERED || text.starts_with(&complete),
                "unexpected reply for {user}: {text}"
            );
        }
        for task in registers {
            let done = task.await.unwrap().unwrap();
            assert_eq!(done.text, render::REGISTERED);
        }

        drop_file_db(db, path).await;
    }

    #[rstest]
    #[tokio::test]
    async fn test_inline_answer_over_sqlite(#[future] test_app: TestApp) {
        let app = test_app.await;
        say(&app, GROUP, 1, "alice", "/addfc 123456789012").await;
        let inline = InlineAnswerHandler::new(build_lookup(&app.db));

        let answer = inline
            .answer(&InlineQuery {
                id: "iq".to_string(),
                from: UserId::new(1),
                query: "myFC".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(answer.message_text, "[alice](tg://user?id=1): SW-1234-5678-9012");
    }

    #[rstest]
    #[tokio::test]
    async fn test_dispatch_delivers_through_transport(#[future] test_app: TestApp) {
        let app = test_app.await;
        let message = group_message(GROUP, 1, "alice", "/addfc 123456789012");

        app.dispatcher.dispatch(message.clone(), message.date).await;

        let sent = app.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, GROUP);
    }
}
