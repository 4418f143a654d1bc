use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;
use super::m20251003_000008_create_forum_category_table::ForumCategory;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumThread::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumThread::Id))
                    .col(integer(ForumThread::CategoryId))
                    .col(integer(ForumThread::AuthorId))
                    .col(string(ForumThread::Title))
                    .col(text(ForumThread::Content))
                    .col(boolean(ForumThread::IsClosed).default(false))
                    .col(timestamp_with_time_zone(ForumThread::CreatedAt))
                    .col(timestamp_with_time_zone(ForumThread::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_thread_category_id")
                            .from(ForumThread::Table, ForumThread::CategoryId)
                            .to(ForumCategory::Table, ForumCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_thread_author_id")
                            .from(ForumThread::Table, ForumThread::AuthorId)
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
            .drop_table(Table::drop().table(ForumThread::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumThread {
    Table,
    Id,
    CategoryId,
    AuthorId,
    Title,
    Content,
    IsClosed,
    CreatedAt,
    UpdatedAt,
}
