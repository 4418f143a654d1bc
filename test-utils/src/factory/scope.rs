//! Scope factory.

use crate::factory::helpers::next_id;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct ScopeFactory<'a> {
    db: &'a DatabaseConnection,
    app_name: String,
    value: String,
    protected: bool,
}

impl<'a> ScopeFactory<'a> {
    /// Defaults: `test_{n}:create`, unprotected.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            app_name: format!("test_{}", next_id()),
            value: "create".to_string(),
            protected: false,
        }
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    pub async fn build(self) -> Result<entity::scope::Model, DbErr> {
        let description = format!("{}:{}", self.app_name, self.value);
        entity::scope::ActiveModel {
            app_name: ActiveValue::Set(self.app_name),
            value: ActiveValue::Set(self.value),
            description: ActiveValue::Set(description),
            protected: ActiveValue::Set(self.protected),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_scope(db: &DatabaseConnection) -> Result<entity::scope::Model, DbErr> {
    ScopeFactory::new(db).build().await
}

/// Returns the scope named `app_name:value`, inserting it if missing.
pub async fn find_or_create_scope(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::scope::Model, DbErr> {
    let Some((app_name, value)) = name.split_once(':') else {
        return Err(DbErr::Custom(format!("scope '{}' has no ':'", name)));
    };

    let existing = entity::prelude::Scope::find()
        .filter(entity::scope::Column::AppName.eq(app_name))
        .filter(entity::scope::Column::Value.eq(value))
        .one(db)
        .await?;

    match existing {
        Some(scope) => Ok(scope),
        None => {
            ScopeFactory::new(db)
                .app_name(app_name)
                .value(value)
                .build()
                .await
        }
    }
}
