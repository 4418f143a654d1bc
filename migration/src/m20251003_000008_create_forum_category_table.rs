use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumCategory::Id))
                    .col(string_uniq(ForumCategory::Name))
                    .col(string(ForumCategory::Description))
                    .col(timestamp_with_time_zone(ForumCategory::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumCategory {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}
