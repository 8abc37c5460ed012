use std::path::Path;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
    sea_query::Index,
};
use tracing::info;

use crate::infrastructure::entity::{group_membership, user_friend_code};

/// Open (creating if missing) the SQLite file at `path`.
pub async fn connect(
    path: &Path,
    max_connections: u32,
    sqlx_logging: bool,
) -> Result<DatabaseConnection, DbErr> {
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let mut opt = ConnectOptions::new(url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(sqlx_logging);

    let db = Database::connect(opt).await?;
    info!(path = %path.display(), "database opened");
    Ok(db)
}

/// Create both registry tables and their indexes when absent.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut friend_codes = schema.create_table_from_entity(user_friend_code::Entity);
    friend_codes.if_not_exists();
    db.execute(backend.build(&friend_codes)).await?;

    let mut memberships = schema.create_table_from_entity(group_membership::Entity);
    memberships.if_not_exists();
    db.execute(backend.build(&memberships)).await?;

    let display_name_index = Index::create()
        .name("idx_user_friend_code_display_name")
        .table(user_friend_code::Entity)
        .col(user_friend_code::Column::DisplayName)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&display_name_index)).await?;

    let friend_code_index = Index::create()
        .name("idx_user_friend_code_friend_code")
        .table(user_friend_code::Entity)
        .col(user_friend_code::Column::FriendCode)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&friend_code_index)).await?;

    Ok(())
}
