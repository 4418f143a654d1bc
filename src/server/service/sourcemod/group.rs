use sea_orm::DatabaseConnection;

use crate::server::{
    data::sourcemod::group::GroupRepository,
    error::AppError,
    model::{
        pagination::{Page, PageParams},
        sourcemod::{Group, GroupParams},
    },
};

pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Group)` - Created group
    /// - `Err(AppError::Conflict)` - Name taken
    pub async fn create(&self, params: GroupParams) -> Result<Group, AppError> {
        let repo = GroupRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Group '{}' already exists",
                params.name
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Group>, AppError> {
        Ok(GroupRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Group>, AppError> {
        Ok(GroupRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn update(&self, id: i32, params: GroupParams) -> Result<Option<Group>, AppError> {
        let repo = GroupRepository::new(self.db);

        if let Some(other) = repo.find_by_name(&params.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Group '{}' already exists",
                    params.name
                )));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes the group; its members keep their own flags and lose the group reference.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = GroupRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }
}
