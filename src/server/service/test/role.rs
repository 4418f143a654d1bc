use super::*;
use crate::server::{
    model::{
        role::{CreateRoleParams, UpdateRoleParams, ADMIN_ROLE},
        scope::ScopeSet,
    },
    service::{bootstrap::BootstrapService, role::RoleService},
};

/// Scope set holding exactly the given scopes.
fn holding(scopes: &[&entity::scope::Model]) -> ScopeSet {
    scopes
        .iter()
        .map(|scope| format!("{}:{}", scope.app_name, scope.value))
        .collect()
}

fn create_params(name: &str, scope_ids: Vec<i32>) -> CreateRoleParams {
    CreateRoleParams {
        name: name.to_string(),
        color: "#3498db".to_string(),
        protected: false,
        scope_ids,
    }
}

/// Tests creating a role with scopes.
///
/// Expected: role returned with its scopes and never protected
#[tokio::test]
async fn creates_role_with_scopes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let scope = factory::create_scope(db).await?;
    let mut params = create_params("Moderator", vec![scope.id]);
    params.protected = true;

    let role = RoleService::new(db)
        .create(params, &holding(&[&scope]))
        .await?;

    assert_eq!(role.name, "Moderator");
    assert!(!role.protected);
    assert_eq!(role.scopes.len(), 1);
    assert_eq!(role.scopes[0].id, scope.id);

    Ok(())
}

/// Tests role creation with invalid input.
///
/// Expected: Conflict for a taken name, BadRequest for an unknown scope id
#[tokio::test]
async fn rejects_duplicate_name_and_unknown_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    let granter = ScopeSet::new();
    service
        .create(create_params("Moderator", vec![]), &granter)
        .await?;

    assert!(matches!(
        service
            .create(create_params("Moderator", vec![]), &granter)
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service
            .create(create_params("Helper", vec![9999]), &granter)
            .await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests the built-in roles.
///
/// Expected: delete and rename are Forbidden, a color change is allowed
#[tokio::test]
async fn protects_builtin_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let service = RoleService::new(db);
    let admin = service
        .get_paginated(PageParams::new(0, 10))
        .await?
        .items
        .into_iter()
        .find(|r| r.name == ADMIN_ROLE)
        .unwrap();

    assert!(matches!(
        service.delete(admin.id).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .update(
                admin.id,
                UpdateRoleParams {
                    name: "Overlord".to_string(),
                    color: admin.color.clone(),
                },
            )
            .await,
        Err(AppError::Forbidden(_))
    ));

    let recolored = service
        .update(
            admin.id,
            UpdateRoleParams {
                name: ADMIN_ROLE.to_string(),
                color: "#000000".to_string(),
            },
        )
        .await?
        .unwrap();
    assert_eq!(recolored.color, "#000000");

    Ok(())
}

/// Tests replacing a role's scopes.
///
/// Expected: holders lose the old scope and gain the new one immediately
#[tokio::test]
async fn set_scopes_changes_member_scopes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let old = factory::scope::find_or_create_scope(db, "posts:create").await?;
    let new = factory::scope::find_or_create_scope(db, "posts:delete").await?;
    let user = factory::create_user(db).await?;

    let granter = holding(&[&old, &new]);
    let service = RoleService::new(db);
    let role = service
        .create(create_params("Writer", vec![old.id]), &granter)
        .await?;
    factory::assign_role(db, user.id, role.id).await?;

    let updated = service
        .set_scopes(role.id, &[new.id], &granter)
        .await?
        .unwrap();
    assert_eq!(updated.scopes.len(), 1);

    let scopes = crate::server::data::scope::ScopeRepository::new(db)
        .get_names_for_user(user.id)
        .await?;
    assert!(scopes.contains("posts:delete"));
    assert!(!scopes.contains("posts:create"));

    assert!(service.set_scopes(9999, &[], &granter).await?.is_none());

    Ok(())
}

/// Tests deleting a custom role.
///
/// Expected: Ok(true), then Ok(false) for the missing role
#[tokio::test]
async fn deletes_custom_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    let role = service
        .create(create_params("Temporary", vec![]), &ScopeSet::new())
        .await?;

    assert!(service.delete(role.id).await?);
    assert!(!service.delete(role.id).await?);

    Ok(())
}

/// Tests granting scopes the acting user does not hold.
///
/// Expected: MissingScopes on create and on adding or removing an unheld scope
#[tokio::test]
async fn scopes_are_capped_by_granter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let held = factory::scope::find_or_create_scope(db, "posts:create").await?;
    let not_held = factory::scope::find_or_create_scope(db, "users:delete").await?;
    let granter = holding(&[&held]);
    let service = RoleService::new(db);

    match service
        .create(create_params("Sneaky", vec![held.id, not_held.id]), &granter)
        .await
    {
        Err(AppError::AuthErr(AuthError::MissingScopes { missing })) => {
            assert_eq!(missing, vec!["users:delete".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let role = service
        .create(create_params("Writer", vec![held.id]), &granter)
        .await?;
    assert!(matches!(
        service.set_scopes(role.id, &[held.id, not_held.id], &granter).await,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    let wide = service
        .create(
            create_params("Wide", vec![held.id, not_held.id]),
            &holding(&[&held, &not_held]),
        )
        .await?;
    assert!(matches!(
        service.set_scopes(wide.id, &[held.id], &granter).await,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    let kept = service
        .set_scopes(wide.id, &[not_held.id], &granter)
        .await?
        .unwrap();
    assert_eq!(kept.scopes.len(), 1);
    assert_eq!(kept.scopes[0].id, not_held.id);

    Ok(())
}
