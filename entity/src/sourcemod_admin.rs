use sea_orm::entity::prelude::*;

/// SourceMod admin entry. A `server_id` of `None` applies the admin to every server.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sourcemod_admin")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub identity: String,
    pub flags: String,
    pub immunity_level: i32,
    pub group_id: Option<i32>,
    pub server_id: Option<i32>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sourcemod_group::Entity",
        from = "Column::GroupId",
        to = "super::sourcemod_group::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    SourcemodGroup,
    #[sea_orm(
        belongs_to = "super::sourcemod_server::Entity",
        from = "Column::ServerId",
        to = "super::sourcemod_server::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SourcemodServer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::sourcemod_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourcemodGroup.def()
    }
}

impl Related<super::sourcemod_server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourcemodServer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
