use sea_orm::DatabaseConnection;

use crate::server::{
    data::forum::{post::PostRepository, thread::ThreadRepository},
    error::AppError,
    middleware::auth::{CurrentUser, Permission},
    model::{
        forum::Post,
        pagination::{Page, PageParams},
    },
    scopes,
};

pub struct PostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts of one thread in the order they were written.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Thread does not exist
    pub async fn get_paginated_by_thread(
        &self,
        thread_id: i32,
        params: PageParams,
    ) -> Result<Page<Post>, AppError> {
        if ThreadRepository::new(self.db)
            .find_entity(thread_id)
            .await?
            .is_none()
        {
            return Err(thread_not_found(thread_id));
        }

        Ok(PostRepository::new(self.db)
            .get_paginated_by_thread(thread_id, params)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        Ok(PostRepository::new(self.db).find_by_id(id).await?)
    }

    /// Replies to a thread and bumps its activity time.
    ///
    /// # Returns
    /// - `Ok(Post)` - Created post
    /// - `Err(AppError::NotFound)` - Thread does not exist
    /// - `Err(AppError::BadRequest)` - Thread is closed
    pub async fn create(
        &self,
        thread_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<Post, AppError> {
        let thread_repo = ThreadRepository::new(self.db);

        let Some(thread) = thread_repo.find_entity(thread_id).await? else {
            return Err(thread_not_found(thread_id));
        };

        if thread.is_closed {
            return Err(AppError::BadRequest(format!(
                "Thread {} is closed",
                thread_id
            )));
        }

        let post = PostRepository::new(self.db)
            .create(thread_id, author_id, content)
            .await?;
        thread_repo.touch(thread_id).await?;

        Ok(post)
    }

    /// Allowed for the author or holders of `posts:update`.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        content: String,
    ) -> Result<Option<Post>, AppError> {
        let repo = PostRepository::new(self.db);

        let Some(post) = repo.find_entity(id).await? else {
            return Ok(None);
        };

        current.authorize(&[Permission::OwnerOr {
            owner_id: post.author_id,
            scope: scopes::POSTS_UPDATE,
        }])?;

        Ok(repo.update(id, content).await?)
    }

    /// Allowed for the author or holders of `posts:delete`.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<bool, AppError> {
        let repo = PostRepository::new(self.db);

        let Some(post) = repo.find_entity(id).await? else {
            return Ok(false);
        };

        current.authorize(&[Permission::OwnerOr {
            owner_id: post.author_id,
            scope: scopes::POSTS_DELETE,
        }])?;

        repo.delete(id).await?;

        Ok(true)
    }
}

fn thread_not_found(thread_id: i32) -> AppError {
    AppError::NotFound(format!("Thread {} not found", thread_id))
}
