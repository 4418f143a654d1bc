//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Returns a process-wide unique value for building distinct names.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user holding one fresh role that owns the given scopes.
///
/// Scope strings are split at the first `:` into app name and value; scopes that already
/// exist are reused so several users can share the same permission.
///
/// # Returns
/// - `Ok(entity::user::Model)` - The created user
/// - `Err(DbErr)` - A scope string lacked a `:` or an insert failed
pub async fn create_user_with_scopes(
    db: &DatabaseConnection,
    scopes: &[&str],
) -> Result<entity::user::Model, DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let role = crate::factory::role::create_role(db).await?;

    for name in scopes {
        let scope = crate::factory::scope::find_or_create_scope(db, name).await?;
        crate::factory::role::grant_scope(db, role.id, scope.id).await?;
    }

    crate::factory::role::assign_role(db, user.id, role.id).await?;

    Ok(user)
}
