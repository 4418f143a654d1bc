use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::scope::ScopeDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub protected: bool,
    pub scopes: Vec<ScopeDto>,
}

/// Role without its scopes, as embedded in user responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RoleSummaryDto {
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateRoleDto {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub scope_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdateRoleDto {
    pub name: String,
    pub color: String,
}

fn default_color() -> String {
    "#ffffff".to_string()
}
