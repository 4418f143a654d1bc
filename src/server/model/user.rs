//! User domain models and parameters.
//!
//! Account registration and profile updates are validated here so the service layer only
//! ever sees well-formed usernames, emails and passwords.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        auth::RegisterDto,
        user::{AuthorDto, UpdateMeDto, UserDto},
    },
    server::{error::AppError, model::role::RoleSummary},
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

/// User account with assigned roles.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub roles: Vec<RoleSummary>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model, roles: Vec<entity::role::Model>) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            is_active: entity.is_active,
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
            roles: roles.into_iter().map(RoleSummary::from_entity).collect(),
        }
    }

    /// Public representation; the email is only exposed through `/api/auth/me`.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            is_active: self.is_active,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
            roles: self.roles.into_iter().map(RoleSummary::into_dto).collect(),
        }
    }
}

/// Author reference embedded in forum threads, posts and chat messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub username: String,
}

impl Author {
    /// Builds the author from an optionally loaded user row.
    ///
    /// Rows whose author has disappeared fall back to a placeholder name.
    pub fn from_entity(author_id: i32, user: Option<&entity::user::Model>) -> Self {
        Self {
            id: author_id,
            username: user
                .map(|u| u.username.clone())
                .unwrap_or_else(|| "[deleted]".to_string()),
        }
    }

    pub fn into_dto(self) -> AuthorDto {
        AuthorDto {
            id: self.id,
            username: self.username,
        }
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
    pub admin_code: Option<String>,
}

impl RegisterParams {
    /// # Returns
    /// - `Ok(RegisterParams)` - Username, email and password are well-formed
    /// - `Err(AppError::BadRequest)` - Any field fails validation
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let username = dto.username.trim().to_string();
        let email = dto.email.trim().to_lowercase();

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&dto.password)?;

        Ok(Self {
            username,
            email,
            password: dto.password,
            admin_code: dto.admin_code.filter(|code| !code.is_empty()),
        })
    }
}

/// Validated self-service profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateMeParams {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateMeParams {
    pub fn from_dto(dto: UpdateMeDto) -> Result<Self, AppError> {
        let email = match dto.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                validate_email(&email)?;
                Some(email)
            }
            None => None,
        };

        if let Some(password) = &dto.password {
            validate_password(password)?;
        }

        Ok(Self {
            email,
            password: dto.password,
        })
    }
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) || !allowed {
        return Err(AppError::BadRequest(format!(
            "Username must be {}-{} characters of letters, digits, '_' or '-'",
            USERNAME_MIN, USERNAME_MAX
        )));
    }

    Ok(())
}

/// Minimal shape check: a non-empty local part and a domain containing a dot.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::BadRequest(format!("Invalid email '{}'", email)));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(AppError::BadRequest(format!(
            "Password must be between {} and {} characters",
            PASSWORD_MIN, PASSWORD_MAX
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterDto {
        RegisterDto {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            admin_code: None,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        let params =
            RegisterParams::from_dto(register(" shark_01 ", "Shark@Example.com", "password123"))
                .unwrap();

        assert_eq!(params.username, "shark_01");
        assert_eq!(params.email, "shark@example.com");
        assert_eq!(params.admin_code, None);
    }

    #[test]
    fn rejects_bad_usernames() {
        for username in ["ab", "has space", "way_too_long_username_for_this_api", "émile"] {
            let result = RegisterParams::from_dto(register(username, "a@b.co", "password123"));
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{}", username);
        }
    }

    #[test]
    fn rejects_bad_emails() {
        for email in ["plain", "@example.com", "a@b", "a@@b.com", "a@.com", "a b@c.com"] {
            assert!(validate_email(email).is_err(), "{}", email);
        }
        assert!(validate_email("a@b.co").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let result = RegisterParams::from_dto(register("shark", "a@b.co", "short"));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_admin_code_is_ignored() {
        let mut dto = register("shark", "a@b.co", "password123");
        dto.admin_code = Some(String::new());

        assert_eq!(RegisterParams::from_dto(dto).unwrap().admin_code, None);
    }

    #[test]
    fn update_me_validates_present_fields_only() {
        assert_eq!(
            UpdateMeParams::from_dto(UpdateMeDto::default()).unwrap(),
            UpdateMeParams::default()
        );
        assert!(UpdateMeParams::from_dto(UpdateMeDto {
            email: Some("nope".to_string()),
            password: None,
        })
        .is_err());
    }
}
