use sea_orm::DatabaseConnection;

use crate::server::{
    data::role::RoleRepository,
    error::AppError,
    model::{
        pagination::{Page, PageParams},
        role::{CreateRoleParams, Role, UpdateRoleParams},
        scope::ScopeSet,
    },
    service::scope::ScopeService,
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an unprotected role with its initial scopes.
    ///
    /// The granter must hold every scope given to the role.
    ///
    /// # Returns
    /// - `Ok(Role)` - Created role with scopes
    /// - `Err(AppError::Conflict)` - Role name taken
    /// - `Err(AppError::BadRequest)` - A scope id does not exist
    /// - `Err(AuthError::MissingScopes)` - A scope is not held by the granter
    pub async fn create(
        &self,
        mut params: CreateRoleParams,
        granter_scopes: &ScopeSet,
    ) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Role '{}' already exists",
                params.name
            )));
        }

        params.scope_ids = ScopeService::new(self.db)
            .grantable_ids(&params.scope_ids, granter_scopes)
            .await?;
        params.protected = false;

        Ok(repo.create(params).await?)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Role>, AppError> {
        Ok(RoleRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Role>, AppError> {
        Ok(RoleRepository::new(self.db).find_by_id(id).await?)
    }

    /// Renames or recolors a role. Protected roles may be edited but not renamed away
    /// from their built-in names.
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Option<Role>, AppError> {
        let repo = RoleRepository::new(self.db);

        let Some(existing) = repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if existing.protected && existing.name != params.name {
            return Err(AppError::Forbidden(format!(
                "Role '{}' is protected and cannot be renamed",
                existing.name
            )));
        }

        if let Some(other) = repo.find_by_name(&params.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Role '{}' already exists",
                    params.name
                )));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes an unprotected role; its members lose the role's scopes immediately.
    ///
    /// # Returns
    /// - `Ok(true)` - Role deleted
    /// - `Ok(false)` - Role not found
    /// - `Err(AppError::Forbidden)` - Role is one of the built-in roles
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = RoleRepository::new(self.db);

        let Some(role) = repo.find_by_id(id).await? else {
            return Ok(false);
        };

        if role.protected {
            return Err(AppError::Forbidden(format!(
                "Role '{}' is protected and cannot be deleted",
                role.name
            )));
        }

        repo.delete(id).await?;

        Ok(true)
    }

    /// Replaces the role's scopes with exactly `scope_ids`.
    ///
    /// The granter must hold every scope being added or removed; scopes the role keeps
    /// are not checked.
    ///
    /// # Returns
    /// - `Ok(Some(Role))` - Role with its new scopes
    /// - `Ok(None)` - Role not found
    /// - `Err(AppError::BadRequest)` - A scope id does not exist
    /// - `Err(AuthError::MissingScopes)` - A changed scope is not held by the granter
    pub async fn set_scopes(
        &self,
        id: i32,
        scope_ids: &[i32],
        granter_scopes: &ScopeSet,
    ) -> Result<Option<Role>, AppError> {
        let repo = RoleRepository::new(self.db);

        let Some(existing) = repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let scope_ids = ScopeService::new(self.db).validate_ids(scope_ids).await?;

        let current_ids: Vec<i32> = existing.scopes.iter().map(|scope| scope.id).collect();
        let changed: Vec<i32> = scope_ids
            .iter()
            .filter(|id| !current_ids.contains(id))
            .chain(current_ids.iter().filter(|id| !scope_ids.contains(id)))
            .copied()
            .collect();
        ScopeService::new(self.db)
            .grantable_ids(&changed, granter_scopes)
            .await?;
        repo.set_scopes(id, &scope_ids).await?;

        Ok(repo.find_by_id(id).await?)
    }
}
