//! Administrative user management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::AppError,
    model::{
        pagination::{Page, PageParams},
        scope::ScopeSet,
        user::User,
    },
    service::scope::check_ceiling,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<User>, AppError> {
        Ok(UserRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db).get_user(id).await?)
    }

    /// Activates or deactivates an account. Inactive users fail every authorization check.
    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<User>, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.set_active(id, is_active).await?.is_none() {
            return Ok(None);
        }

        if !is_active {
            tracing::info!("Deactivated user {}", id);
        }

        Ok(repo.get_user(id).await?)
    }

    /// Replaces the user's roles with exactly `role_ids`.
    ///
    /// Every role being added or removed must grant only scopes the granter holds, so
    /// nobody can hand out or take away more than their own access.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User with the new roles
    /// - `Ok(None)` - User not found
    /// - `Err(AppError::BadRequest)` - A role id does not exist
    /// - `Err(AuthError::MissingScopes)` - A changed role grants a scope the granter lacks
    pub async fn set_roles(
        &self,
        id: i32,
        role_ids: &[i32],
        granter_scopes: &ScopeSet,
    ) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);
        let role_repo = RoleRepository::new(self.db);

        if user_repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let found: Vec<i32> = role_repo
            .find_by_ids(role_ids)
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect();

        let unknown: Vec<String> = role_ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();

        if !unknown.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Unknown role ids: {}",
                unknown.join(", ")
            )));
        }

        let current: Vec<i32> = role_repo
            .get_for_user(id)
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect();
        let changed: Vec<i32> = found
            .iter()
            .filter(|id| !current.contains(id))
            .chain(current.iter().filter(|id| !found.contains(id)))
            .copied()
            .collect();

        let changed_scopes: Vec<String> = role_repo
            .get_scopes_for_roles(&changed)
            .await?
            .into_values()
            .flatten()
            .map(|scope| format!("{}:{}", scope.app_name, scope.value))
            .collect();
        check_ceiling(granter_scopes, &changed_scopes)?;

        role_repo.set_user_roles(id, &found).await?;

        Ok(user_repo.get_user(id).await?)
    }

    /// Deletes the account together with everything it authored.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }
}
