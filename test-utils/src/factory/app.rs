//! Client application factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Secret every factory app gets unless overridden.
pub const DEFAULT_SECRET: &str = "app-secret";

pub struct AppFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    client_id: String,
    secret: String,
}

impl<'a> AppFactory<'a> {
    /// Defaults: `App {n}`, client id `client_{n}`, `DEFAULT_SECRET`.
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("App {}", id),
            client_id: format!("client_{}", id),
            secret: DEFAULT_SECRET.to_string(),
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    pub async fn build(self) -> Result<entity::app::Model, DbErr> {
        let secret_hash = bcrypt::hash(&self.secret, 4)
            .map_err(|e| DbErr::Custom(format!("failed to hash test secret: {}", e)))?;

        entity::app::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(String::new()),
            client_id: ActiveValue::Set(self.client_id),
            secret_hash: ActiveValue::Set(secret_hash),
            owner_id: ActiveValue::Set(self.owner_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Adds `scope_id` to the scopes `app_id` may use.
pub async fn grant_app_scope(
    db: &DatabaseConnection,
    app_id: i32,
    scope_id: i32,
) -> Result<entity::app_scope::Model, DbErr> {
    entity::app_scope::ActiveModel {
        app_id: ActiveValue::Set(app_id),
        scope_id: ActiveValue::Set(scope_id),
    }
    .insert(db)
    .await
}
