use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sourcemod_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub flags: String,
    pub immunity_level: i32,
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
