use super::*;

/// Tests resolving scopes through a single role.
///
/// Verifies that the repository walks user roles and role scopes and returns the
/// `app_name:value` strings of every granted scope.
///
/// Expected: Ok with exactly the granted scopes
#[tokio::test]
async fn resolves_scopes_through_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user_with_scopes(db, &["threads:create", "posts:create"]).await?;
    factory::create_user_with_scopes(db, &["roles:delete"]).await?;

    let scopes = ScopeRepository::new(db).get_names_for_user(user.id).await?;

    assert_eq!(
        scopes.into_vec(),
        vec!["posts:create".to_string(), "threads:create".to_string()]
    );

    Ok(())
}

/// Tests that overlapping roles produce each scope once.
///
/// Expected: Ok with the union of both roles
#[tokio::test]
async fn unions_overlapping_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let shared = factory::scope::find_or_create_scope(db, "chat:all").await?;
    let extra = factory::scope::find_or_create_scope(db, "chat:create").await?;

    let first = factory::create_role(db).await?;
    let second = factory::create_role(db).await?;
    factory::role::grant_scope(db, first.id, shared.id).await?;
    factory::role::grant_scope(db, second.id, shared.id).await?;
    factory::role::grant_scope(db, second.id, extra.id).await?;
    factory::assign_role(db, user.id, first.id).await?;
    factory::assign_role(db, user.id, second.id).await?;

    let scopes = ScopeRepository::new(db).get_names_for_user(user.id).await?;

    assert_eq!(scopes.len(), 2);
    assert!(scopes.contains("chat:all"));
    assert!(scopes.contains("chat:create"));

    Ok(())
}

/// Tests a user without roles.
///
/// Expected: Ok with an empty set
#[tokio::test]
async fn returns_empty_without_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let scopes = ScopeRepository::new(db).get_names_for_user(user.id).await?;

    assert!(scopes.is_empty());

    Ok(())
}

/// Tests that removing a role takes its scopes away.
///
/// Expected: Ok with an empty set after the role assignment is replaced
#[tokio::test]
async fn reflects_role_removal() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user_with_scopes(db, &["users:all"]).await?;
    let repo = ScopeRepository::new(db);
    assert!(repo.get_names_for_user(user.id).await?.contains("users:all"));

    crate::server::data::role::RoleRepository::new(db)
        .set_user_roles(user.id, &[])
        .await?;

    assert!(repo.get_names_for_user(user.id).await?.is_empty());

    Ok(())
}
