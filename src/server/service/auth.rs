//! Account registration and password login.
//!
//! Passwords are hashed with bcrypt on a blocking thread. A successful login stores only
//! the user id in the session; scopes are resolved again on every request.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, internal::InternalError, AppError},
    middleware::session::AuthSession,
    model::{
        role::{ADMIN_ROLE, USER_ROLE},
        user::{RegisterParams, UpdateMeParams, User},
    },
    service::admin::code::AdminCodeService,
    util::password::{hash_password, verify_password},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    admin_code_service: &'a AdminCodeService,
    password_hash_cost: u32,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        admin_code_service: &'a AdminCodeService,
        password_hash_cost: u32,
    ) -> Self {
        Self {
            db,
            admin_code_service,
            password_hash_cost,
        }
    }

    /// Creates an account holding the member role.
    ///
    /// When `admin_code` is present it must match the current one-time admin code, which
    /// adds the Admin role. The code is only consumed once the account has been stored, so
    /// a registration that fails for any reason leaves it valid. If another registration
    /// consumes it first, the new account is removed again.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user with roles
    /// - `Err(AppError::Conflict)` - Username or email already registered
    /// - `Err(AppError::BadRequest)` - Admin code invalid or expired
    /// - `Err(AppError::InternalErr)` - Default roles were never seeded
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let role_repo = RoleRepository::new(self.db);

        if user_repo.find_by_username(&params.username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                params.username
            )));
        }

        if user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::Conflict(
                "Email is already registered".to_string(),
            ));
        }

        let member_role = role_repo
            .find_by_name(USER_ROLE)
            .await?
            .ok_or_else(|| InternalError::MissingDefaultRole(USER_ROLE.to_string()))?;

        let admin_role = match &params.admin_code {
            Some(code) => {
                if !self.admin_code_service.is_valid(code).await {
                    return Err(invalid_admin_code());
                }

                Some(
                    role_repo
                        .find_by_name(ADMIN_ROLE)
                        .await?
                        .ok_or_else(|| InternalError::MissingDefaultRole(ADMIN_ROLE.to_string()))?,
                )
            }
            None => None,
        };

        let password_hash = hash_password(params.password, self.password_hash_cost).await?;
        let user = user_repo
            .create(params.username, params.email, password_hash)
            .await?;

        role_repo.add_user_role(user.id, member_role.id).await?;

        match (admin_role, &params.admin_code) {
            (Some(admin_role), Some(code)) => {
                if !self.admin_code_service.validate_and_consume(code).await {
                    user_repo.delete(user.id).await?;
                    return Err(invalid_admin_code());
                }

                role_repo.add_user_role(user.id, admin_role.id).await?;
                tracing::warn!("User '{}' registered as administrator", user.username);
            }
            _ => tracing::info!("Registered user '{}'", user.username),
        }

        self.load_user(user.id).await
    }

    /// Verifies credentials and logs the user into `session`.
    ///
    /// `login` may be either the username or the email address.
    ///
    /// # Returns
    /// - `Ok(User)` - Logged-in user
    /// - `Err(AuthError::InvalidCredentials)` - Unknown login or wrong password
    /// - `Err(AuthError::UserInactive)` - Account deactivated
    pub async fn login(
        &self,
        session: &Session,
        login: &str,
        password: String,
    ) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);
        let login = login.trim();

        let user = if login.contains('@') {
            repo.find_by_email(&login.to_lowercase()).await?
        } else {
            repo.find_by_username(login).await?
        };

        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::debug!("Failed login for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::UserInactive(user.id).into());
        }

        repo.update_last_login(user.id).await?;
        AuthSession::new(session).set_user_id(user.id).await?;

        self.load_user(user.id).await
    }

    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        AuthSession::new(session).clear().await
    }

    /// Current user's profile including roles.
    pub async fn me(&self, user_id: i32) -> Result<User, AppError> {
        self.load_user(user_id).await
    }

    /// Changes the current user's email and/or password.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::Conflict)` - Email belongs to another account
    pub async fn update_me(&self, user_id: i32, params: UpdateMeParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(email) = &params.email {
            if let Some(other) = repo.find_by_email(email).await? {
                if other.id != user_id {
                    return Err(AppError::Conflict(
                        "Email is already registered".to_string(),
                    ));
                }
            }
        }

        let password_hash = match params.password {
            Some(password) => Some(hash_password(password, self.password_hash_cost).await?),
            None => None,
        };

        if repo
            .update_credentials(user_id, params.email, password_hash)
            .await?
            .is_none()
        {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        }

        self.load_user(user_id).await
    }

    async fn load_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .get_user(user_id)
            .await?
            .ok_or_else(|| {
                InternalError::RecordMissingAfterWrite {
                    table: "user",
                    id: user_id,
                }
                .into()
            })
    }
}

fn invalid_admin_code() -> AppError {
    AppError::BadRequest("Invalid or expired admin code".to_string())
}
