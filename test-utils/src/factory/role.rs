//! Role factory and role assignment helpers.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct RoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    color: String,
    protected: bool,
}

impl<'a> RoleFactory<'a> {
    /// Defaults: `Role {n}`, `#ffffff`, unprotected.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Role {}", next_id()),
            color: "#ffffff".to_string(),
            protected: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    pub async fn build(self) -> Result<entity::role::Model, DbErr> {
        entity::role::ActiveModel {
            name: ActiveValue::Set(self.name),
            color: ActiveValue::Set(self.color),
            protected: ActiveValue::Set(self.protected),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db).build().await
}

/// Gives `user_id` the role `role_id`.
pub async fn assign_role(
    db: &DatabaseConnection,
    user_id: i32,
    role_id: i32,
) -> Result<entity::user_role::Model, DbErr> {
    entity::user_role::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        role_id: ActiveValue::Set(role_id),
    }
    .insert(db)
    .await
}

/// Adds `scope_id` to the scopes owned by `role_id`.
pub async fn grant_scope(
    db: &DatabaseConnection,
    role_id: i32,
    scope_id: i32,
) -> Result<entity::role_scope::Model, DbErr> {
    entity::role_scope::ActiveModel {
        role_id: ActiveValue::Set(role_id),
        scope_id: ActiveValue::Set(scope_id),
    }
    .insert(db)
    .await
}
