//! Scope domain models.
//!
//! A scope is a permission string `{app_name}:{value}` granting access to one action.
//! Users receive scopes only through their roles; `ScopeSet` is the flattened union that
//! authorization checks run against.

use std::collections::BTreeSet;

use crate::{
    model::scope::{CreateScopeDto, ScopeDto},
    server::error::AppError,
};

/// A single permission record.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub id: i32,
    pub app_name: String,
    pub value: String,
    pub description: String,
    /// Protected scopes belong to the built-in catalogue and cannot be deleted.
    pub protected: bool,
}

impl Scope {
    /// Full scope string, e.g. `threads:create`.
    pub fn name(&self) -> String {
        format!("{}:{}", self.app_name, self.value)
    }

    pub fn from_entity(entity: entity::scope::Model) -> Self {
        Self {
            id: entity.id,
            app_name: entity.app_name,
            value: entity.value,
            description: entity.description,
            protected: entity.protected,
        }
    }

    pub fn into_dto(self) -> ScopeDto {
        ScopeDto {
            name: self.name(),
            id: self.id,
            app_name: self.app_name,
            value: self.value,
            description: self.description,
            protected: self.protected,
        }
    }
}

/// Deduplicated set of scope strings resolved for a user or an app.
///
/// Ordering carries no meaning; a `BTreeSet` only keeps listings stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, scope: impl Into<String>) -> bool {
        self.0.insert(scope.into())
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    /// Required scopes absent from the set, in the order they were requested.
    ///
    /// Duplicates in `required` are reported once.
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();

        for scope in required {
            if !self.contains(scope) && !missing.iter().any(|m| m == scope) {
                missing.push(scope.to_string());
            }
        }

        missing
    }

    /// Whether `required` is a subset of this set. An empty requirement always holds.
    pub fn contains_all(&self, required: &[&str]) -> bool {
        self.missing(required).is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<String> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// Validated input for creating a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateScopeParams {
    pub app_name: String,
    pub value: String,
    pub description: String,
    pub protected: bool,
}

impl CreateScopeParams {
    /// Validates a scope submitted through the API. API-created scopes are never protected.
    ///
    /// # Returns
    /// - `Ok(CreateScopeParams)` - Both parts are well-formed
    /// - `Err(AppError::BadRequest)` - `app_name` or `value` is empty or uses invalid characters
    pub fn from_dto(dto: CreateScopeDto) -> Result<Self, AppError> {
        let app_name = dto.app_name.trim().to_string();
        let value = dto.value.trim().to_string();

        validate_app_name(&app_name)?;
        validate_value(&value)?;

        Ok(Self {
            app_name,
            value,
            description: dto.description.trim().to_string(),
            protected: false,
        })
    }
}

fn is_scope_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// `app_name` must be non-empty lowercase `[a-z0-9_]`.
pub fn validate_app_name(app_name: &str) -> Result<(), AppError> {
    if app_name.is_empty() || !app_name.chars().all(is_scope_char) {
        return Err(AppError::BadRequest(format!(
            "Invalid scope app name '{}': use lowercase letters, digits and '_'",
            app_name
        )));
    }

    Ok(())
}

/// `value` follows the app name rules but may also contain inner `:` separators.
pub fn validate_value(value: &str) -> Result<(), AppError> {
    let valid = !value.is_empty()
        && value
            .split(':')
            .all(|part| !part.is_empty() && part.chars().all(is_scope_char));

    if !valid {
        return Err(AppError::BadRequest(format!(
            "Invalid scope value '{}': use lowercase letters, digits, '_' and inner ':'",
            value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(scopes: &[&str]) -> ScopeSet {
        scopes.iter().copied().collect()
    }

    #[test]
    fn missing_lists_absent_scopes_once() {
        let scopes = set(&["threads:create", "posts:create"]);

        assert_eq!(
            scopes.missing(&["threads:create", "threads:delete", "threads:delete"]),
            vec!["threads:delete".to_string()]
        );
    }

    #[test]
    fn empty_requirement_is_satisfied() {
        assert!(ScopeSet::new().contains_all(&[]));
        assert!(!ScopeSet::new().contains_all(&["users:me"]));
    }

    #[test]
    fn union_deduplicates() {
        let scopes: ScopeSet = ["a:b", "a:b", "c:d"].into_iter().collect();
        assert_eq!(scopes.len(), 2);
    }

    #[test]
    fn validates_scope_parts() {
        assert!(validate_app_name("sourcemod_admins").is_ok());
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("Threads").is_err());
        assert!(validate_app_name("a:b").is_err());

        assert!(validate_value("me_update").is_ok());
        assert!(validate_value("admin:flags").is_ok());
        assert!(validate_value(":flags").is_err());
        assert!(validate_value("flags:").is_err());
        assert!(validate_value("a b").is_err());
    }

    #[test]
    fn from_dto_trims_and_rejects() {
        let params = CreateScopeParams::from_dto(CreateScopeDto {
            app_name: " shop ".to_string(),
            value: "buy".to_string(),
            description: "Buy items".to_string(),
        })
        .unwrap();
        assert_eq!(params.app_name, "shop");
        assert!(!params.protected);

        let result = CreateScopeParams::from_dto(CreateScopeDto {
            app_name: "shop".to_string(),
            value: String::new(),
            description: String::new(),
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
