use super::*;
use crate::server::{
    model::{app::CreateAppParams, scope::ScopeSet},
    service::app::AppService,
    util::password::verify_password,
};

fn params(name: &str, owner_id: i32, scope_ids: Vec<i32>) -> CreateAppParams {
    CreateAppParams {
        name: name.to_string(),
        description: String::new(),
        owner_id,
        scope_ids,
    }
}

/// Tests creating an app with scopes its creator holds.
///
/// Expected: app stored with the scopes and a secret that verifies against the stored hash
#[tokio::test]
async fn creates_app_within_granter_scopes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let scope = factory::scope::find_or_create_scope(db, "sourcemod_admins:all").await?;
    let granter: ScopeSet = ["sourcemod_admins:all"].into_iter().collect();

    let created = AppService::new(db, 4)
        .create(params("plugin", owner.id, vec![scope.id]), &granter)
        .await?;

    assert_eq!(created.app.owner_id, owner.id);
    assert_eq!(created.app.scopes.len(), 1);
    assert!(!created.client_secret.is_empty());

    let stored = crate::server::data::app::AppRepository::new(db)
        .find_by_client_id(&created.app.client_id)
        .await?
        .unwrap();
    assert!(verify_password(created.client_secret, stored.secret_hash).await?);

    Ok(())
}

/// Tests that an app cannot receive scopes its creator lacks.
///
/// Expected: Err(MissingScopes) naming the scope, nothing stored
#[tokio::test]
async fn rejects_scopes_above_granter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let scope = factory::scope::find_or_create_scope(db, "users:delete").await?;

    let service = AppService::new(db, 4);
    let result = service
        .create(params("sneaky", owner.id, vec![scope.id]), &ScopeSet::new())
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::MissingScopes { missing })) => {
            assert_eq!(missing, vec!["users:delete"]);
        }
        other => panic!("Expected MissingScopes, got: {:?}", other.map(|a| a.app.id)),
    }

    let page = service.get_paginated(None, PageParams::default()).await?;
    assert_eq!(page.total, 0);

    Ok(())
}

/// Tests app creation input errors.
///
/// Expected: Conflict for a taken name, BadRequest for an unknown scope id
#[tokio::test]
async fn rejects_duplicate_name_and_unknown_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let service = AppService::new(db, 4);
    let granter = ScopeSet::new();

    service.create(params("plugin", owner.id, vec![]), &granter).await?;

    assert!(matches!(
        service.create(params("plugin", owner.id, vec![]), &granter).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service.create(params("other", owner.id, vec![4242]), &granter).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests the owner filter on listings.
///
/// Expected: Some(owner) returns only that user's apps, None returns all
#[tokio::test]
async fn lists_apps_by_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    factory::app::AppFactory::new(db, alice.id).build().await?;
    factory::app::AppFactory::new(db, alice.id).build().await?;
    factory::app::AppFactory::new(db, bob.id).build().await?;

    let service = AppService::new(db, 4);

    let mine = service
        .get_paginated(Some(alice.id), PageParams::default())
        .await?;
    assert_eq!(mine.total, 2);
    assert!(mine.items.iter().all(|a| a.owner_id == alice.id));

    let all = service.get_paginated(None, PageParams::default()).await?;
    assert_eq!(all.total, 3);

    Ok(())
}

/// Tests replacing an app's scopes.
///
/// Expected: the ceiling applies again, unknown app yields None
#[tokio::test]
async fn set_scopes_respects_ceiling() -> Result<(), AppError> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let held = factory::scope::find_or_create_scope(db, "sourcemod_servers:all").await?;
    let not_held = factory::scope::find_or_create_scope(db, "roles:delete").await?;
    let app = factory::app::AppFactory::new(db, owner.id).build().await?;
    let granter: ScopeSet = ["sourcemod_servers:all"].into_iter().collect();

    let service = AppService::new(db, 4);

    let updated = service
        .set_scopes(app.id, &[held.id], &granter)
        .await?
        .unwrap();
    assert_eq!(updated.scopes[0].id, held.id);

    assert!(matches!(
        service.set_scopes(app.id, &[not_held.id], &granter).await,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));
    assert!(service.set_scopes(9999, &[], &granter).await?.is_none());

    Ok(())
}
