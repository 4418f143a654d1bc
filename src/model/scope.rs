use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ScopeDto {
    pub id: i32,
    pub app_name: String,
    pub value: String,
    /// `{app_name}:{value}`
    pub name: String,
    pub description: String,
    pub protected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateScopeDto {
    pub app_name: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdateScopeDto {
    pub description: String,
}

/// Replaces a role's or app's scope set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SetScopesDto {
    pub scope_ids: Vec<i32>,
}
