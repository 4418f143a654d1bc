//! Forum category, thread and post factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_category(
    db: &DatabaseConnection,
) -> Result<entity::forum_category::Model, DbErr> {
    let id = next_id();
    entity::forum_category::ActiveModel {
        name: ActiveValue::Set(format!("Category {}", id)),
        description: ActiveValue::Set(format!("Description {}", id)),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub struct ThreadFactory<'a> {
    db: &'a DatabaseConnection,
    category_id: i32,
    author_id: i32,
    title: String,
    is_closed: bool,
}

impl<'a> ThreadFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, category_id: i32, author_id: i32) -> Self {
        Self {
            db,
            category_id,
            author_id,
            title: format!("Thread {}", next_id()),
            is_closed: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn closed(mut self, is_closed: bool) -> Self {
        self.is_closed = is_closed;
        self
    }

    pub async fn build(self) -> Result<entity::forum_thread::Model, DbErr> {
        let now = Utc::now();
        entity::forum_thread::ActiveModel {
            category_id: ActiveValue::Set(self.category_id),
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set("Thread content".to_string()),
            is_closed: ActiveValue::Set(self.is_closed),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_thread(
    db: &DatabaseConnection,
    category_id: i32,
    author_id: i32,
) -> Result<entity::forum_thread::Model, DbErr> {
    ThreadFactory::new(db, category_id, author_id).build().await
}

pub async fn create_post(
    db: &DatabaseConnection,
    thread_id: i32,
    author_id: i32,
) -> Result<entity::forum_post::Model, DbErr> {
    let now = Utc::now();
    entity::forum_post::ActiveModel {
        thread_id: ActiveValue::Set(thread_id),
        author_id: ActiveValue::Set(author_id),
        content: ActiveValue::Set(format!("Post {}", next_id())),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
