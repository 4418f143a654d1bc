//! Client application domain models.
//!
//! An app is an OAuth-like client owned by a user. It authenticates with a client id and
//! secret and acts with the subset of scopes assigned to it.

use chrono::{DateTime, Utc};

use crate::{
    model::app::{AppDto, CreateAppDto, UpdateAppDto},
    server::{error::AppError, model::scope::Scope},
};

#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub client_id: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub scopes: Vec<Scope>,
}

impl App {
    pub fn from_entity(entity: entity::app::Model, scopes: Vec<entity::scope::Model>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            client_id: entity.client_id,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            scopes: scopes.into_iter().map(Scope::from_entity).collect(),
        }
    }

    pub fn into_dto(self) -> AppDto {
        AppDto {
            id: self.id,
            name: self.name,
            description: self.description,
            client_id: self.client_id,
            owner_id: self.owner_id,
            created_at: self.created_at,
            scopes: self.scopes.into_iter().map(Scope::into_dto).collect(),
        }
    }
}

/// A freshly created app and the only copy of its plaintext secret.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedApp {
    pub app: App,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAppParams {
    pub name: String,
    pub description: String,
    pub owner_id: i32,
    pub scope_ids: Vec<i32>,
}

impl CreateAppParams {
    pub fn from_dto(owner_id: i32, dto: CreateAppDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate_app_name(&dto.name)?,
            description: dto.description.trim().to_string(),
            owner_id,
            scope_ids: dto.scope_ids,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAppParams {
    pub name: String,
    pub description: String,
}

impl UpdateAppParams {
    pub fn from_dto(dto: UpdateAppDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate_app_name(&dto.name)?,
            description: dto.description.trim().to_string(),
        })
    }
}

fn validate_app_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::BadRequest(
            "App name must be between 1 and 64 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}
