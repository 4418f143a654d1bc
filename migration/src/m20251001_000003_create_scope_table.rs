use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scope::Table)
                    .if_not_exists()
                    .col(pk_auto(Scope::Id))
                    .col(string(Scope::AppName))
                    .col(string(Scope::Value))
                    .col(string(Scope::Description))
                    .col(boolean(Scope::Protected).default(false))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_scope_app_name_value")
                            .col(Scope::AppName)
                            .col(Scope::Value),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scope::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Scope {
    Table,
    Id,
    AppName,
    Value,
    Description,
    Protected,
}
