use sea_orm::DatabaseConnection;

use crate::server::{
    data::forum::{category::CategoryRepository, thread::ThreadRepository},
    error::AppError,
    middleware::auth::{CurrentUser, Permission},
    model::{
        forum::{Thread, ThreadParams},
        pagination::{Page, PageParams},
    },
    scopes,
};

pub struct ThreadService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ThreadService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Threads of one category, most recently active first.
    ///
    /// # Returns
    /// - `Ok(Page<Thread>)` - Requested page
    /// - `Err(AppError::NotFound)` - Category does not exist
    pub async fn get_paginated_by_category(
        &self,
        category_id: i32,
        params: PageParams,
    ) -> Result<Page<Thread>, AppError> {
        self.require_category(category_id).await?;

        Ok(ThreadRepository::new(self.db)
            .get_paginated_by_category(category_id, params)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Thread>, AppError> {
        Ok(ThreadRepository::new(self.db).find_by_id(id).await?)
    }

    /// # Returns
    /// - `Ok(Thread)` - Created thread, authored by `author_id`
    /// - `Err(AppError::NotFound)` - Category does not exist
    pub async fn create(
        &self,
        category_id: i32,
        author_id: i32,
        params: ThreadParams,
    ) -> Result<Thread, AppError> {
        self.require_category(category_id).await?;

        let thread = ThreadRepository::new(self.db)
            .create(category_id, author_id, params)
            .await?;
        tracing::debug!("User {} opened thread {}", author_id, thread.id);

        Ok(thread)
    }

    /// Edits the title and content. Allowed for the author or holders of `threads:update`.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        params: ThreadParams,
    ) -> Result<Option<Thread>, AppError> {
        let repo = ThreadRepository::new(self.db);

        let Some(thread) = repo.find_entity(id).await? else {
            return Ok(None);
        };

        current.authorize(&[Permission::OwnerOr {
            owner_id: thread.author_id,
            scope: scopes::THREADS_UPDATE,
        }])?;

        Ok(repo.update(id, params).await?)
    }

    /// Closing a thread stops new posts; existing posts stay editable.
    pub async fn set_closed(&self, id: i32, closed: bool) -> Result<Option<Thread>, AppError> {
        Ok(ThreadRepository::new(self.db).set_closed(id, closed).await?)
    }

    /// Deletes the thread and its posts. Allowed for the author or holders of
    /// `threads:delete`.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<bool, AppError> {
        let repo = ThreadRepository::new(self.db);

        let Some(thread) = repo.find_entity(id).await? else {
            return Ok(false);
        };

        current.authorize(&[Permission::OwnerOr {
            owner_id: thread.author_id,
            scope: scopes::THREADS_DELETE,
        }])?;

        repo.delete(id).await?;

        Ok(true)
    }

    async fn require_category(&self, category_id: i32) -> Result<(), AppError> {
        if CategoryRepository::new(self.db)
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }

        Ok(())
    }
}
