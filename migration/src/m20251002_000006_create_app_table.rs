use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(App::Table)
                    .if_not_exists()
                    .col(pk_auto(App::Id))
                    .col(string_uniq(App::Name))
                    .col(string(App::Description))
                    .col(string_uniq(App::ClientId))
                    .col(string(App::SecretHash))
                    .col(integer(App::OwnerId))
                    .col(timestamp_with_time_zone(App::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_owner_id")
                            .from(App::Table, App::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(App::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum App {
    Table,
    Id,
    Name,
    Description,
    ClientId,
    SecretHash,
    OwnerId,
    CreatedAt,
}
