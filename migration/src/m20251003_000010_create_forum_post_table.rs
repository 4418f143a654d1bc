use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;
use super::m20251003_000009_create_forum_thread_table::ForumThread;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumPost::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumPost::Id))
                    .col(integer(ForumPost::ThreadId))
                    .col(integer(ForumPost::AuthorId))
                    .col(text(ForumPost::Content))
                    .col(timestamp_with_time_zone(ForumPost::CreatedAt))
                    .col(timestamp_with_time_zone(ForumPost::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_post_thread_id")
                            .from(ForumPost::Table, ForumPost::ThreadId)
                            .to(ForumThread::Table, ForumThread::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_post_author_id")
                            .from(ForumPost::Table, ForumPost::AuthorId)
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
            .drop_table(Table::drop().table(ForumPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumPost {
    Table,
    Id,
    ThreadId,
    AuthorId,
    Content,
    CreatedAt,
    UpdatedAt,
}
