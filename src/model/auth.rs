use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub email: String,
    pub password: String,
    /// One-time code printed at startup while no admin exists.
    #[serde(default)]
    pub admin_code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

/// The authenticated user together with every scope their roles grant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CurrentUserDto {
    pub user: UserDto,
    pub email: String,
    pub scopes: Vec<String>,
}
