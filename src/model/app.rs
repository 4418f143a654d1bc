use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::scope::ScopeDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AppDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub client_id: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub scopes: Vec<ScopeDto>,
}

/// Returned once on creation; the secret cannot be read back afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreatedAppDto {
    pub app: AppDto,
    pub client_secret: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateAppDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdateAppDto {
    pub name: String,
    pub description: String,
}
