//! SourceMod server, group and admin factories.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_server(
    db: &DatabaseConnection,
) -> Result<entity::sourcemod_server::Model, DbErr> {
    let id = next_id();
    entity::sourcemod_server::ActiveModel {
        name: ActiveValue::Set(format!("Server {}", id)),
        ip: ActiveValue::Set("127.0.0.1".to_string()),
        port: ActiveValue::Set(27015),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_group(
    db: &DatabaseConnection,
    flags: &str,
    immunity_level: i32,
) -> Result<entity::sourcemod_group::Model, DbErr> {
    entity::sourcemod_group::ActiveModel {
        name: ActiveValue::Set(format!("Group {}", next_id())),
        flags: ActiveValue::Set(flags.to_string()),
        immunity_level: ActiveValue::Set(immunity_level),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub struct AdminFactory<'a> {
    db: &'a DatabaseConnection,
    identity: String,
    flags: String,
    immunity_level: i32,
    group_id: Option<i32>,
    server_id: Option<i32>,
}

impl<'a> AdminFactory<'a> {
    /// Defaults: a unique `STEAM_0:0:{n}` identity with no flags on every server.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            identity: format!("STEAM_0:0:{}", next_id()),
            flags: String::new(),
            immunity_level: 0,
            group_id: None,
            server_id: None,
        }
    }

    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = flags.into();
        self
    }

    pub fn immunity(mut self, immunity_level: i32) -> Self {
        self.immunity_level = immunity_level;
        self
    }

    pub fn group(mut self, group_id: i32) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn server(mut self, server_id: i32) -> Self {
        self.server_id = Some(server_id);
        self
    }

    pub async fn build(self) -> Result<entity::sourcemod_admin::Model, DbErr> {
        entity::sourcemod_admin::ActiveModel {
            name: ActiveValue::Set(format!("Admin {}", next_id())),
            identity: ActiveValue::Set(self.identity),
            flags: ActiveValue::Set(self.flags),
            immunity_level: ActiveValue::Set(self.immunity_level),
            group_id: ActiveValue::Set(self.group_id),
            server_id: ActiveValue::Set(self.server_id),
            user_id: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
