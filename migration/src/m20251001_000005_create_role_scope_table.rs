use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000002_create_role_table::Role;
use super::m20251001_000003_create_scope_table::Scope;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleScope::Table)
                    .if_not_exists()
                    .col(integer(RoleScope::RoleId))
                    .col(integer(RoleScope::ScopeId))
                    .primary_key(Index::create().col(RoleScope::RoleId).col(RoleScope::ScopeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_scope_role_id")
                            .from(RoleScope::Table, RoleScope::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_scope_scope_id")
                            .from(RoleScope::Table, RoleScope::ScopeId)
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
            .drop_table(Table::drop().table(RoleScope::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RoleScope {
    Table,
    RoleId,
    ScopeId,
}
