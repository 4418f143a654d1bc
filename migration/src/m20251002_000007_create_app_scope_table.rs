use sea_orm_migration::{prelude::*, schema::*};

use super::m20251002_000006_create_app_table::App;
use super::m20251001_000003_create_scope_table::Scope;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppScope::Table)
                    .if_not_exists()
                    .col(integer(AppScope::AppId))
                    .col(integer(AppScope::ScopeId))
                    .primary_key(Index::create().col(AppScope::AppId).col(AppScope::ScopeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_scope_app_id")
                            .from(AppScope::Table, AppScope::AppId)
                            .to(App::Table, App::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_scope_scope_id")
                            .from(AppScope::Table, AppScope::ScopeId)
                            .to(Scope::Table, Scope::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppScope::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AppScope {
    Table,
    AppId,
    ScopeId,
}
