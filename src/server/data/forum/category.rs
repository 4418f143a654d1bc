use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    forum::{Category, CategoryParams},
    pagination::{Page, PageParams},
};

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CategoryParams) -> Result<Category, DbErr> {
        let entity = entity::forum_category::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::ForumCategory::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::ForumCategory::find()
            .filter(entity::forum_category::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Category>, DbErr> {
        let paginator = entity::prelude::ForumCategory::find()
            .order_by_asc(entity::forum_category::Column::Name)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let categories = paginator.fetch_page(params.page).await?;

        Ok(Page::new(
            categories.into_iter().map(Category::from_entity).collect(),
            total,
            params,
        ))
    }

    pub async fn update(&self, id: i32, params: CategoryParams) -> Result<Option<Category>, DbErr> {
        let Some(existing) = entity::prelude::ForumCategory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::forum_category::ActiveModel = existing.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        let updated = active.update(self.db).await?;

        Ok(Some(Category::from_entity(updated)))
    }

    /// Deletes the category together with its threads and their posts.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        let thread_ids: Vec<i32> = entity::prelude::ForumThread::find()
            .filter(entity::forum_thread::Column::CategoryId.eq(id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if !thread_ids.is_empty() {
            entity::prelude::ForumPost::delete_many()
                .filter(entity::forum_post::Column::ThreadId.is_in(thread_ids.clone()))
                .exec(self.db)
                .await?;
            entity::prelude::ForumThread::delete_many()
                .filter(entity::forum_thread::Column::Id.is_in(thread_ids))
                .exec(self.db)
                .await?;
        }

        entity::prelude::ForumCategory::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
