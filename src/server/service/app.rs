//! Client applications authenticating with a client id and secret.
//!
//! An app may only be granted scopes the granting user holds, and at request time its
//! scopes are further capped by what its owner still holds.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::app::AppRepository,
    error::AppError,
    model::{
        app::{App, CreateAppParams, CreatedApp, UpdateAppParams},
        pagination::{Page, PageParams},
        scope::ScopeSet,
    },
    service::scope::ScopeService,
    util::{password::hash_password, token::random_alphanumeric},
};

const CLIENT_ID_LENGTH: usize = 24;
const CLIENT_SECRET_LENGTH: usize = 48;

pub struct AppService<'a> {
    db: &'a DatabaseConnection,
    secret_hash_cost: u32,
}

impl<'a> AppService<'a> {
    pub fn new(db: &'a DatabaseConnection, secret_hash_cost: u32) -> Self {
        Self {
            db,
            secret_hash_cost,
        }
    }

    /// Registers an app and returns its secret in plaintext. Only the hash is stored.
    ///
    /// # Arguments
    /// - `params` - Validated app fields and requested scope ids
    /// - `granter_scopes` - Scopes of the user creating the app
    ///
    /// # Returns
    /// - `Ok(CreatedApp)` - App plus its one-time visible secret
    /// - `Err(AppError::Conflict)` - App name taken
    /// - `Err(AppError::BadRequest)` - Unknown scope id
    /// - `Err(AuthError::MissingScopes)` - A requested scope is not held by the creator
    pub async fn create(
        &self,
        mut params: CreateAppParams,
        granter_scopes: &ScopeSet,
    ) -> Result<CreatedApp, AppError> {
        let repo = AppRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "App '{}' already exists",
                params.name
            )));
        }

        params.scope_ids = ScopeService::new(self.db)
            .grantable_ids(&params.scope_ids, granter_scopes)
            .await?;

        let client_id = random_alphanumeric(CLIENT_ID_LENGTH).to_lowercase();
        let client_secret = random_alphanumeric(CLIENT_SECRET_LENGTH);
        let secret_hash = hash_password(client_secret.clone(), self.secret_hash_cost).await?;

        let app = repo.create(params, client_id, secret_hash).await?;
        tracing::info!("Created app '{}' for user {}", app.name, app.owner_id);

        Ok(CreatedApp { app, client_secret })
    }

    /// Lists every app, or only `owner_id`'s apps when set.
    pub async fn get_paginated(
        &self,
        owner_id: Option<i32>,
        params: PageParams,
    ) -> Result<Page<App>, AppError> {
        Ok(AppRepository::new(self.db)
            .get_paginated(owner_id, params)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<App>, AppError> {
        Ok(AppRepository::new(self.db).find_by_id(id).await?)
    }

    pub async fn update(&self, id: i32, params: UpdateAppParams) -> Result<Option<App>, AppError> {
        let repo = AppRepository::new(self.db);

        if let Some(other) = repo.find_by_name(&params.name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "App '{}' already exists",
                    params.name
                )));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let repo = AppRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;

        Ok(true)
    }

    /// Replaces the app's scope subset.
    ///
    /// # Returns
    /// - `Ok(Some(App))` - App with its new scopes
    /// - `Ok(None)` - App not found
    /// - `Err(AppError::BadRequest)` - Unknown scope id
    /// - `Err(AuthError::MissingScopes)` - A scope is not held by the granting user
    pub async fn set_scopes(
        &self,
        id: i32,
        scope_ids: &[i32],
        granter_scopes: &ScopeSet,
    ) -> Result<Option<App>, AppError> {
        let repo = AppRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let scope_ids = ScopeService::new(self.db)
            .grantable_ids(scope_ids, granter_scopes)
            .await?;
        repo.set_scopes(id, &scope_ids).await?;

        Ok(repo.find_by_id(id).await?)
    }
}
