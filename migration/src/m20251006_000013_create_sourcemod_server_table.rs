use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourcemodServer::Table)
                    .if_not_exists()
                    .col(pk_auto(SourcemodServer::Id))
                    .col(string(SourcemodServer::Name))
                    .col(string(SourcemodServer::Ip))
                    .col(integer(SourcemodServer::Port))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SourcemodServer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SourcemodServer {
    Table,
    Id,
    Name,
    Ip,
    Port,
}
