use sea_orm::DatabaseConnection;

use crate::server::{
    data::scope::ScopeRepository,
    error::{auth::AuthError, AppError},
    model::{
        pagination::{Page, PageParams},
        scope::{CreateScopeParams, Scope, ScopeSet},
    },
};

pub struct ScopeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScopeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a scope after checking `app_name:value` is not taken.
    ///
    /// # Returns
    /// - `Ok(Scope)` - Created scope
    /// - `Err(AppError::Conflict)` - A scope with the same name exists
    pub async fn create(&self, params: CreateScopeParams) -> Result<Scope, AppError> {
        let repo = ScopeRepository::new(self.db);

        if repo
            .find_by_name(&params.app_name, &params.value)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Scope '{}:{}' already exists",
                params.app_name, params.value
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<Scope>, AppError> {
        Ok(ScopeRepository::new(self.db).get_paginated(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Scope>, AppError> {
        Ok(ScopeRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn update_description(
        &self,
        id: i32,
        description: String,
    ) -> Result<Option<Scope>, AppError> {
        Ok(ScopeRepository::new(self.db)
            .update_description(id, description.trim().to_string())
            .await?)
    }

    /// Deletes an unprotected scope, revoking it from every role and app.
    ///
    /// # Returns
    /// - `Ok(true)` - Scope deleted
    /// - `Ok(false)` - Scope not found
    /// - `Err(AppError::Forbidden)` - Scope belongs to the built-in catalogue
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = ScopeRepository::new(self.db);

        let Some(scope) = repo.find_by_id(id).await? else {
            return Ok(false);
        };

        if scope.protected {
            return Err(AppError::Forbidden(format!(
                "Scope '{}' is protected and cannot be deleted",
                scope.name()
            )));
        }

        repo.delete(id).await?;

        Ok(true)
    }

    /// Checks that every id refers to an existing scope.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - The ids, deduplicated, in request order
    /// - `Err(AppError::BadRequest)` - Lists the unknown ids
    pub async fn validate_ids(&self, ids: &[i32]) -> Result<Vec<i32>, AppError> {
        let mut unique: Vec<i32> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let found: Vec<i32> = ScopeRepository::new(self.db)
            .find_by_ids(&unique)
            .await?
            .into_iter()
            .map(|scope| scope.id)
            .collect();

        let unknown: Vec<String> = unique
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();

        if !unknown.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Unknown scope ids: {}",
                unknown.join(", ")
            )));
        }

        Ok(unique)
    }

    /// Validates `ids` and checks the granter holds every scope they name.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - The ids, deduplicated, in request order
    /// - `Err(AppError::BadRequest)` - An id does not exist
    /// - `Err(AuthError::MissingScopes)` - Lists the scopes the granter lacks
    pub async fn grantable_ids(
        &self,
        ids: &[i32],
        granter_scopes: &ScopeSet,
    ) -> Result<Vec<i32>, AppError> {
        let ids = self.validate_ids(ids).await?;

        let names: Vec<String> = ScopeRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|scope| format!("{}:{}", scope.app_name, scope.value))
            .collect();
        check_ceiling(granter_scopes, &names)?;

        Ok(ids)
    }
}

/// Fails unless the granter holds every scope in `names`.
pub fn check_ceiling(granter_scopes: &ScopeSet, names: &[String]) -> Result<(), AuthError> {
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    let missing = granter_scopes.missing(&names);
    if !missing.is_empty() {
        return Err(AuthError::MissingScopes { missing });
    }

    Ok(())
}
