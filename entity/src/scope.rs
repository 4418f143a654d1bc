use sea_orm::entity::prelude::*;

/// A permission string split into its `{app_name}:{value}` parts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scope")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub app_name: String,
    pub value: String,
    pub description: String,
    pub protected: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_scope::Entity")]
    RoleScope,
    #[sea_orm(has_many = "super::app_scope::Entity")]
    AppScope,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_scope::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_scope::Relation::Scope.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
