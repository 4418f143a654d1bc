use sea_orm::DatabaseConnection;

use crate::server::{
    data::forum::category::CategoryRepository,
    error::AppError,
    model::{
        forum::{Category, CategoryParams},
        pagination::{Page, PageParams},
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Category)` - Created category
    /// - `Err(AppError::Conflict)` - Name taken
    pub async fn create(&self, params: CategoryParams) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                params.name
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        params: CategoryParams,
    ) -> Result<Option<Category>, AppError> {
        let repo = CategoryRepository::new(self.db);

        if let Some(other) = repo.find_by_name(&params.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    params.name
                )));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes the category with all of its threads and posts.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = CategoryRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }
}
