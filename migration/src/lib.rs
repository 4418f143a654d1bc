pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_user_table;
mod m20251001_000002_create_role_table;
mod m20251001_000003_create_scope_table;
mod m20251001_000004_create_user_role_table;
mod m20251001_000005_create_role_scope_table;
mod m20251002_000006_create_app_table;
mod m20251002_000007_create_app_scope_table;
mod m20251003_000008_create_forum_category_table;
mod m20251003_000009_create_forum_thread_table;
mod m20251003_000010_create_forum_post_table;
mod m20251004_000011_create_chat_message_table;
mod m20251005_000012_create_steam_profile_table;
mod m20251006_000013_create_sourcemod_server_table;
mod m20251006_000014_create_sourcemod_group_table;
mod m20251006_000015_create_sourcemod_admin_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_user_table::Migration),
            Box::new(m20251001_000002_create_role_table::Migration),
            Box::new(m20251001_000003_create_scope_table::Migration),
            Box::new(m20251001_000004_create_user_role_table::Migration),
            Box::new(m20251001_000005_create_role_scope_table::Migration),
            Box::new(m20251002_000006_create_app_table::Migration),
            Box::new(m20251002_000007_create_app_scope_table::Migration),
            Box::new(m20251003_000008_create_forum_category_table::Migration),
            Box::new(m20251003_000009_create_forum_thread_table::Migration),
            Box::new(m20251003_000010_create_forum_post_table::Migration),
            Box::new(m20251004_000011_create_chat_message_table::Migration),
            Box::new(m20251005_000012_create_steam_profile_table::Migration),
            Box::new(m20251006_000013_create_sourcemod_server_table::Migration),
            Box::new(m20251006_000014_create_sourcemod_group_table::Migration),
            Box::new(m20251006_000015_create_sourcemod_admin_table::Migration),
        ]
    }
}
