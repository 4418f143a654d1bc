use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sourcemod_server")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub ip: String,
    pub port: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sourcemod_admin::Entity")]
    SourcemodAdmin,
}

impl Related<super::sourcemod_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourcemodAdmin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
