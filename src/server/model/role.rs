//! Role domain models and parameters.

use crate::{
    model::role::{CreateRoleDto, RoleDto, RoleSummaryDto, UpdateRoleDto},
    server::{error::AppError, model::scope::Scope},
};

pub const ADMIN_ROLE: &str = "Admin";
pub const USER_ROLE: &str = "User";
pub const BANNED_ROLE: &str = "Banned";

/// Role together with every scope it grants.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub protected: bool,
    pub scopes: Vec<Scope>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model, scopes: Vec<entity::scope::Model>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            color: entity.color,
            protected: entity.protected,
            scopes: scopes.into_iter().map(Scope::from_entity).collect(),
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            color: self.color,
            protected: self.protected,
            scopes: self.scopes.into_iter().map(Scope::into_dto).collect(),
        }
    }
}

/// Role without scopes, as listed on a user.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSummary {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl RoleSummary {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            color: entity.color,
        }
    }

    pub fn into_dto(self) -> RoleSummaryDto {
        RoleSummaryDto {
            id: self.id,
            name: self.name,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoleParams {
    pub name: String,
    pub color: String,
    pub protected: bool,
    pub scope_ids: Vec<i32>,
}

impl CreateRoleParams {
    pub fn from_dto(dto: CreateRoleDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate_role_name(&dto.name)?,
            color: validate_color(&dto.color)?,
            protected: false,
            scope_ids: dto.scope_ids,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRoleParams {
    pub name: String,
    pub color: String,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate_role_name(&dto.name)?,
            color: validate_color(&dto.color)?,
        })
    }
}

/// Trims the name and checks it is 1..=64 characters.
fn validate_role_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::BadRequest(
            "Role name must be between 1 and 64 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Accepts `#rgb` or `#rrggbb` hex colors and lowercases them.
fn validate_color(color: &str) -> Result<String, AppError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::BadRequest(format!(
            "Invalid color '{}': expected #rgb or #rrggbb",
            color
        )));
    }
    Ok(color.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_colors() {
        assert_eq!(validate_color("#FFaa00").unwrap(), "#ffaa00");
        assert!(validate_color("#fff").is_ok());
        assert!(validate_color("ffffff").is_err());
        assert!(validate_color("#ggg").is_err());
    }

    #[test]
    fn trims_role_name() {
        let params = CreateRoleParams::from_dto(CreateRoleDto {
            name: "  Moderator ".to_string(),
            color: "#ffffff".to_string(),
            scope_ids: vec![1],
        })
        .unwrap();

        assert_eq!(params.name, "Moderator");
        assert!(!params.protected);
        assert!(validate_role_name("   ").is_err());
    }
}
