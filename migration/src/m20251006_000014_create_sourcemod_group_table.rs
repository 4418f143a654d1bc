use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourcemodGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(SourcemodGroup::Id))
                    .col(string_uniq(SourcemodGroup::Name))
                    .col(string(SourcemodGroup::Flags))
                    .col(integer(SourcemodGroup::ImmunityLevel).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SourcemodGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SourcemodGroup {
    Table,
    Id,
    Name,
    Flags,
    ImmunityLevel,
}
