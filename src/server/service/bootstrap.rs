//! Startup seeding of the built-in scope catalogue and roles.
//!
//! Seeding is idempotent: existing scopes and roles are left in place, except that the
//! Admin role is re-granted the full catalogue on every start so newly added scopes reach
//! administrators without a manual step.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{role::RoleRepository, scope::ScopeRepository},
    error::AppError,
    model::{
        role::{CreateRoleParams, ADMIN_ROLE, BANNED_ROLE, USER_ROLE},
        scope::CreateScopeParams,
    },
    scopes::{default_scopes, MEMBER_SCOPES},
};

const ADMIN_COLOR: &str = "#e74c3c";
const USER_COLOR: &str = "#3498db";
const BANNED_COLOR: &str = "#7f8c8d";

pub struct BootstrapService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BootstrapService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Seeds scopes, then roles.
    pub async fn seed(&self) -> Result<(), AppError> {
        let created = self.seed_scopes().await?;
        if created > 0 {
            tracing::info!("Seeded {} default scopes", created);
        }

        self.seed_roles().await?;

        Ok(())
    }

    /// Inserts missing catalogue scopes as protected.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of scopes inserted
    pub async fn seed_scopes(&self) -> Result<usize, AppError> {
        let repo = ScopeRepository::new(self.db);
        let mut created = 0;

        for scope in default_scopes() {
            if repo
                .find_by_name(scope.app_name, scope.value)
                .await?
                .is_some()
            {
                continue;
            }

            repo.create(CreateScopeParams {
                app_name: scope.app_name.to_string(),
                value: scope.value.to_string(),
                description: scope.description,
                protected: true,
            })
            .await?;
            created += 1;
        }

        Ok(created)
    }

    /// Ensures the Admin, User and Banned roles exist.
    ///
    /// Admin always ends up with every scope in the database. User receives the member
    /// scopes only when first created so later edits by administrators survive restarts.
    pub async fn seed_roles(&self) -> Result<(), AppError> {
        let role_repo = RoleRepository::new(self.db);
        let scope_repo = ScopeRepository::new(self.db);

        let all_scope_ids = scope_repo.get_all_ids().await?;
        match role_repo.find_by_name(ADMIN_ROLE).await? {
            Some(admin) => role_repo.set_scopes(admin.id, &all_scope_ids).await?,
            None => {
                role_repo
                    .create(protected_role(ADMIN_ROLE, ADMIN_COLOR, all_scope_ids))
                    .await?;
                tracing::info!("Created role '{}'", ADMIN_ROLE);
            }
        }

        if role_repo.find_by_name(USER_ROLE).await?.is_none() {
            let member_scope_ids = scope_repo.get_ids_by_names(MEMBER_SCOPES).await?;
            role_repo
                .create(protected_role(USER_ROLE, USER_COLOR, member_scope_ids))
                .await?;
            tracing::info!("Created role '{}'", USER_ROLE);
        }

        if role_repo.find_by_name(BANNED_ROLE).await?.is_none() {
            role_repo
                .create(protected_role(BANNED_ROLE, BANNED_COLOR, Vec::new()))
                .await?;
            tracing::info!("Created role '{}'", BANNED_ROLE);
        }

        Ok(())
    }

    /// Whether any user currently holds the Admin role.
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        let role_repo = RoleRepository::new(self.db);

        let Some(admin) = role_repo.find_by_name(ADMIN_ROLE).await? else {
            return Ok(false);
        };

        Ok(role_repo.has_members(admin.id).await?)
    }
}

fn protected_role(name: &str, color: &str, scope_ids: Vec<i32>) -> CreateRoleParams {
    CreateRoleParams {
        name: name.to_string(),
        color: color.to_string(),
        protected: true,
        scope_ids,
    }
}
