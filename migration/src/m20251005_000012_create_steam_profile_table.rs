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
                    .table(SteamProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(SteamProfile::Id))
                    .col(integer_uniq(SteamProfile::UserId))
                    .col(big_integer_uniq(SteamProfile::Steamid64))
                    .col(string(SteamProfile::Steam2))
                    .col(string(SteamProfile::Steam3))
                    .col(string(SteamProfile::Username))
                    .col(string(SteamProfile::ProfileUrl))
                    .col(string(SteamProfile::AvatarUrl))
                    .col(string_null(SteamProfile::CountryCode))
                    .col(timestamp_with_time_zone(SteamProfile::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_steam_profile_user_id")
                            .from(SteamProfile::Table, SteamProfile::UserId)
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
            .drop_table(Table::drop().table(SteamProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SteamProfile {
    Table,
    Id,
    UserId,
    Steamid64,
    Steam2,
    Steam3,
    Username,
    ProfileUrl,
    AvatarUrl,
    CountryCode,
    UpdatedAt,
}
