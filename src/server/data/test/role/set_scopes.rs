use super::*;

/// Tests replacing a role's scopes.
///
/// Verifies that previous grants are removed and the new set is stored once even when
/// ids repeat.
///
/// Expected: Ok with only the new scopes attached
#[tokio::test]
async fn replaces_existing_scopes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    let old = factory::scope::find_or_create_scope(db, "posts:create").await?;
    let new = factory::scope::find_or_create_scope(db, "posts:update").await?;
    factory::role::grant_scope(db, role.id, old.id).await?;

    let repo = RoleRepository::new(db);
    repo.set_scopes(role.id, &[new.id, new.id]).await?;

    let scopes = repo.get_scopes(role.id).await?;
    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].id, new.id);

    Ok(())
}

/// Tests clearing a role's scopes.
///
/// Expected: Ok with no scopes left
#[tokio::test]
async fn clears_scopes_with_empty_list() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    let scope = factory::create_scope(db).await?;
    factory::role::grant_scope(db, role.id, scope.id).await?;

    let repo = RoleRepository::new(db);
    repo.set_scopes(role.id, &[]).await?;

    assert!(repo.get_scopes(role.id).await?.is_empty());

    Ok(())
}
