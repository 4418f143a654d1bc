//! Request authorization.
//!
//! Every protected handler builds an `AuthGuard` from the database and the session and
//! declares the permissions it needs. The guard loads the session user, rejects inactive
//! accounts, resolves the user's scopes through their roles and checks each permission.
//!
//! ```rust,ignore
//! let current = AuthGuard::new(&state.db, &session)
//!     .require(&[Permission::Scope(scopes::THREADS_CREATE)])
//!     .await?;
//! ```
//!
//! Machine clients (SourceMod plugins) authenticate as an app instead; `PrincipalGuard`
//! accepts either form.

use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{app::AppRepository, scope::ScopeRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::scope::ScopeSet,
    util::password::verify_password,
};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const CLIENT_SECRET_HEADER: &str = "x-client-secret";

/// A single requirement declared by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The scope must be among the user's resolved scopes.
    Scope(&'static str),
    /// Satisfied when the current user is `owner_id`; otherwise `scope` is required.
    OwnerOr { owner_id: i32, scope: &'static str },
}

/// The authenticated user together with their resolved scopes.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: entity::user::Model,
    pub scopes: ScopeSet,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Checks permissions against the already resolved scopes.
    ///
    /// Used directly when the owner of a record is only known after loading it.
    ///
    /// # Returns
    /// - `Ok(())` - Every permission holds
    /// - `Err(AuthError::MissingScopes)` - Lists every scope that would have been needed
    pub fn authorize(&self, permissions: &[Permission]) -> Result<(), AuthError> {
        let required: Vec<&str> = permissions
            .iter()
            .filter_map(|permission| match permission {
                Permission::Scope(scope) => Some(*scope),
                Permission::OwnerOr { owner_id, .. } if *owner_id == self.user.id => None,
                Permission::OwnerOr { scope, .. } => Some(*scope),
            })
            .collect();

        let missing = self.scopes.missing(&required);
        if !missing.is_empty() {
            return Err(AuthError::MissingScopes { missing });
        }

        Ok(())
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Authenticates the session user and checks `permissions`.
    ///
    /// An empty permission list only requires an authenticated, active user.
    ///
    /// # Returns
    /// - `Ok(CurrentUser)` - User with resolved scopes
    /// - `Err(AuthError::UserNotInSession)` - Anonymous request
    /// - `Err(AuthError::UserNotInDatabase)` - Session references a deleted user
    /// - `Err(AuthError::UserInactive)` - Account deactivated
    /// - `Err(AuthError::MissingScopes)` - A permission is not satisfied
    pub async fn require(&self, permissions: &[Permission]) -> Result<CurrentUser, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::UserInactive(user_id).into());
        }

        let scopes = ScopeRepository::new(self.db)
            .get_names_for_user(user_id)
            .await?;

        let current = CurrentUser { user, scopes };
        current.authorize(permissions)?;

        Ok(current)
    }
}

/// Who is calling: a logged-in user or an authenticated client application.
#[derive(Debug, Clone)]
pub enum Principal {
    User(CurrentUser),
    App {
        app: entity::app::Model,
        scopes: ScopeSet,
    },
}

impl Principal {
    pub fn scopes(&self) -> &ScopeSet {
        match self {
            Self::User(current) => &current.scopes,
            Self::App { scopes, .. } => scopes,
        }
    }
}

/// Authorizes either an app (client credential headers) or the session user.
pub struct PrincipalGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
    headers: &'a HeaderMap,
}

impl<'a> PrincipalGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            session,
            headers,
        }
    }

    /// Requires every scope in `scopes`.
    ///
    /// When `X-Client-Id` is present the request is authenticated as that app and the
    /// session is ignored. An app's effective scopes are its assigned scopes that its owner
    /// still holds, and an app whose owner is inactive has none.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Authenticated principal holding every scope
    /// - `Err(AuthError::InvalidAppCredentials)` - Unknown client id or wrong secret
    /// - any error of `AuthGuard::require` for session users
    pub async fn require(&self, scopes: &[&'static str]) -> Result<Principal, AppError> {
        let Some(client_id) = header_value(self.headers, CLIENT_ID_HEADER) else {
            let permissions: Vec<Permission> =
                scopes.iter().copied().map(Permission::Scope).collect();
            let current = AuthGuard::new(self.db, self.session)
                .require(&permissions)
                .await?;
            return Ok(Principal::User(current));
        };

        let secret = header_value(self.headers, CLIENT_SECRET_HEADER).unwrap_or_default();

        let Some(app) = AppRepository::new(self.db)
            .find_by_client_id(&client_id)
            .await?
        else {
            return Err(AuthError::InvalidAppCredentials.into());
        };

        if !verify_password(secret, app.secret_hash.clone()).await? {
            return Err(AuthError::InvalidAppCredentials.into());
        }

        let effective = self.app_scopes(&app).await?;

        let missing = effective.missing(scopes);
        if !missing.is_empty() {
            return Err(AuthError::MissingScopes { missing }.into());
        }

        Ok(Principal::App {
            app,
            scopes: effective,
        })
    }

    async fn app_scopes(&self, app: &entity::app::Model) -> Result<ScopeSet, AppError> {
        let owner_active = UserRepository::new(self.db)
            .find_by_id(app.owner_id)
            .await?
            .map(|owner| owner.is_active)
            .unwrap_or(false);

        if !owner_active {
            return Ok(ScopeSet::new());
        }

        let scope_repo = ScopeRepository::new(self.db);
        let assigned = scope_repo.get_names_for_app(app.id).await?;
        let owner_scopes = scope_repo.get_names_for_user(app.owner_id).await?;

        Ok(assigned
            .iter()
            .filter(|scope| owner_scopes.contains(scope))
            .cloned()
            .collect())
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
