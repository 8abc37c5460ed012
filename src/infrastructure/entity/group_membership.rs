use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "group_membership")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_friend_code::Entity",
        from = "Column::UserId",
        to = "super::user_friend_code::Column::UserId"
    )]
    UserFriendCode,
}

impl Related<super::user_friend_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFriendCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
