use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::{
    chat::ChatMessage,
    pagination::{Page, PageParams},
};

pub struct ChatRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChatRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a message and returns it with its author resolved.
    pub async fn create(
        &self,
        author: &entity::user::Model,
        content: String,
    ) -> Result<ChatMessage, DbErr> {
        let message = entity::chat_message::ActiveModel {
            author_id: ActiveValue::Set(author.id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ChatMessage::from_entity(message, Some(author)))
    }

    /// Newest messages first.
    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<ChatMessage>, DbErr> {
        let paginator = entity::prelude::ChatMessage::find()
            .order_by_desc(entity::chat_message::Column::CreatedAt)
            .order_by_desc(entity::chat_message::Column::Id)
            .find_also_related(entity::prelude::User)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let messages = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            messages
                .into_iter()
                .map(|(message, author)| ChatMessage::from_entity(message, author.as_ref()))
                .collect(),
            total,
            params,
        ))
    }
}
