use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;
use super::m20251006_000013_create_sourcemod_server_table::SourcemodServer;
use super::m20251006_000014_create_sourcemod_group_table::SourcemodGroup;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourcemodAdmin::Table)
                    .if_not_exists()
                    .col(pk_auto(SourcemodAdmin::Id))
                    .col(string(SourcemodAdmin::Name))
                    .col(string(SourcemodAdmin::Identity))
                    .col(string(SourcemodAdmin::Flags))
                    .col(integer(SourcemodAdmin::ImmunityLevel).default(0))
                    .col(integer_null(SourcemodAdmin::GroupId))
                    .col(integer_null(SourcemodAdmin::ServerId))
                    .col(integer_null(SourcemodAdmin::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sourcemod_admin_group_id")
                            .from(SourcemodAdmin::Table, SourcemodAdmin::GroupId)
                            .to(SourcemodGroup::Table, SourcemodGroup::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sourcemod_admin_server_id")
                            .from(SourcemodAdmin::Table, SourcemodAdmin::ServerId)
                            .to(SourcemodServer::Table, SourcemodServer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sourcemod_admin_user_id")
                            .from(SourcemodAdmin::Table, SourcemodAdmin::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SourcemodAdmin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SourcemodAdmin {
    Table,
    Id,
    Name,
    Identity,
    Flags,
    ImmunityLevel,
    GroupId,
    ServerId,
    UserId,
}
