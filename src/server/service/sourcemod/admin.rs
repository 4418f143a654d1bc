use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        sourcemod::{admin::AdminRepository, group::GroupRepository, server::ServerRepository},
        user::UserRepository,
    },
    error::AppError,
    model::{
        pagination::{Page, PageParams},
        sourcemod::{Admin, AdminParams},
    },
};

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Admin)` - Created admin with group name
    /// - `Err(AppError::BadRequest)` - Referenced group, server or user does not exist
    pub async fn create(&self, params: AdminParams) -> Result<Admin, AppError> {
        self.check_references(&params).await?;

        Ok(AdminRepository::new(self.db).create(params).await?)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Admin>, AppError> {
        Ok(AdminRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Admin>, AppError> {
        Ok(AdminRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn update(&self, id: i32, params: AdminParams) -> Result<Option<Admin>, AppError> {
        let repo = AdminRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        self.check_references(&params).await?;

        Ok(repo.update(id, params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = AdminRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }

    async fn check_references(&self, params: &AdminParams) -> Result<(), AppError> {
        if let Some(group_id) = params.group_id {
            if GroupRepository::new(self.db)
                .find_by_id(group_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Group {} does not exist",
                    group_id
                )));
            }
        }

        if let Some(server_id) = params.server_id {
            if ServerRepository::new(self.db)
                .find_by_id(server_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Server {} does not exist",
                    server_id
                )));
            }
        }

        if let Some(user_id) = params.user_id {
            if UserRepository::new(self.db)
                .find_by_id(user_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "User {} does not exist",
                    user_id
                )));
            }
        }

        Ok(())
    }
}
