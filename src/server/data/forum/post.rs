use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    forum::Post,
    pagination::{Page, PageParams},
};

pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        thread_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<Post, DbErr> {
        let now = Utc::now();
        let post = entity::forum_post::ActiveModel {
            thread_id: ActiveValue::Set(thread_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.find_by_id(post.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Post with id {} not found after creation",
                post.id
            )))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DbErr> {
        let post = entity::prelude::ForumPost::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(post.map(|(post, author)| Post::from_entity(post, author.as_ref())))
    }

    pub async fn find_entity(&self, id: i32) -> Result<Option<entity::forum_post::Model>, DbErr> {
        entity::prelude::ForumPost::find_by_id(id).one(self.db).await
    }

    /// Posts of a thread in chronological order.
    pub async fn get_paginated_by_thread(
        &self,
        thread_id: i32,
        params: PageParams,
    ) -> Result<Page<Post>, DbErr> {
        let paginator = entity::prelude::ForumPost::find()
            .filter(entity::forum_post::Column::ThreadId.eq(thread_id))
            .order_by_asc(entity::forum_post::Column::CreatedAt)
            .order_by_asc(entity::forum_post::Column::Id)
            .find_also_related(entity::prelude::User)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let posts = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            posts
                .into_iter()
                .map(|(post, author)| Post::from_entity(post, author.as_ref()))
                .collect(),
            total,
            params,
        ))
    }

    pub async fn update(&self, id: i32, content: String) -> Result<Option<Post>, DbErr> {
        let Some(existing) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::forum_post::ActiveModel = existing.into();
        active.content = ActiveValue::Set(content);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ForumPost::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
