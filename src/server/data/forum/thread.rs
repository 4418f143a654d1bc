use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    forum::{Thread, ThreadParams},
    pagination::{Page, PageParams},
};

pub struct ThreadRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ThreadRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        category_id: i32,
        author_id: i32,
        params: ThreadParams,
    ) -> Result<Thread, DbErr> {
        let now = Utc::now();
        let thread = entity::forum_thread::ActiveModel {
            category_id: ActiveValue::Set(category_id),
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            is_closed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.find_by_id(thread.id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Thread with id {} not found after creation",
                thread.id
            )))
    }

    /// Loads the thread with its author and post count.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Thread>, DbErr> {
        let Some((thread, author)) = entity::prelude::ForumThread::find_by_id(id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let post_count = entity::prelude::ForumPost::find()
            .filter(entity::forum_post::Column::ThreadId.eq(id))
            .count(self.db)
            .await?;

        Ok(Some(Thread::from_entity(thread, author.as_ref(), post_count)))
    }

    /// Raw row, used for ownership and closed-state checks.
    pub async fn find_entity(&self, id: i32) -> Result<Option<entity::forum_thread::Model>, DbErr> {
        entity::prelude::ForumThread::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Threads in a category, most recently updated first.
    pub async fn get_paginated_by_category(
        &self,
        category_id: i32,
        params: PageParams,
    ) -> Result<Page<Thread>, DbErr> {
        let paginator = entity::prelude::ForumThread::find()
            .filter(entity::forum_thread::Column::CategoryId.eq(category_id))
            .order_by_desc(entity::forum_thread::Column::UpdatedAt)
            .order_by_desc(entity::forum_thread::Column::Id)
            .find_also_related(entity::prelude::User)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let threads = paginator.fetch_page(params.page).await?;

        let thread_ids: Vec<i32> = threads.iter().map(|(t, _)| t.id).collect();
        let counts = self.post_counts(thread_ids).await?;

        let items = threads
            .into_iter()
            .map(|(thread, author)| {
                let post_count = counts.get(&thread.id).copied().unwrap_or(0);
                Thread::from_entity(thread, author.as_ref(), post_count)
            })
            .collect();

        Ok(Page::new(items, total, params))
    }

    async fn post_counts(&self, thread_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if thread_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::ForumPost::find()
            .select_only()
            .column(entity::forum_post::Column::ThreadId)
            .column_as(entity::forum_post::Column::Id.count(), "post_count")
            .filter(entity::forum_post::Column::ThreadId.is_in(thread_ids))
            .group_by(entity::forum_post::Column::ThreadId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(thread_id, count)| (thread_id, count.max(0) as u64))
            .collect())
    }

    pub async fn update(&self, id: i32, params: ThreadParams) -> Result<Option<Thread>, DbErr> {
        let Some(existing) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::forum_thread::ActiveModel = existing.into();
        active.title = ActiveValue::Set(params.title);
        active.content = ActiveValue::Set(params.content);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    pub async fn set_closed(&self, id: i32, is_closed: bool) -> Result<Option<Thread>, DbErr> {
        let Some(existing) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::forum_thread::ActiveModel = existing.into();
        active.is_closed = ActiveValue::Set(is_closed);
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    /// Bumps `updated_at` so active threads sort first.
    pub async fn touch(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ForumThread::update_many()
            .filter(entity::forum_thread::Column::Id.eq(id))
            .col_expr(
                entity::forum_thread::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ForumPost::delete_many()
            .filter(entity::forum_post::Column::ThreadId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::ForumThread::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
