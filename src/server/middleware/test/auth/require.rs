use super::*;

/// Tests a user holding the required scope through a role.
///
/// Expected: Ok(CurrentUser) with the scope in the resolved set
#[tokio::test]
async fn grants_access_with_scope_from_role() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user_with_scopes(db, &["threads:create"]).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[Permission::Scope("threads:create")])
        .await?;

    assert_eq!(current.id(), user.id);
    assert!(current.has_scope("threads:create"));

    Ok(())
}

/// Tests that scopes from every assigned role are unioned.
///
/// Expected: Ok with scopes from both roles present, each once
#[tokio::test]
async fn unions_scopes_across_roles() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_role(db).await?;
    let second = factory::create_role(db).await?;
    let shared = factory::scope::find_or_create_scope(db, "posts:create").await?;
    let extra = factory::scope::find_or_create_scope(db, "posts:delete").await?;

    factory::role::grant_scope(db, first.id, shared.id).await?;
    factory::role::grant_scope(db, second.id, shared.id).await?;
    factory::role::grant_scope(db, second.id, extra.id).await?;
    factory::assign_role(db, user.id, first.id).await?;
    factory::assign_role(db, user.id, second.id).await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[
            Permission::Scope("posts:create"),
            Permission::Scope("posts:delete"),
        ])
        .await?;

    assert_eq!(current.scopes.len(), 2);

    Ok(())
}

/// Tests that every missing scope is reported.
///
/// Expected: Err(AuthError::MissingScopes) listing only the absent scopes
#[tokio::test]
async fn denies_and_lists_missing_scopes() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user_with_scopes(db, &["roles:all"]).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[
            Permission::Scope("roles:all"),
            Permission::Scope("roles:create"),
            Permission::Scope("roles:delete"),
        ])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::MissingScopes { missing })) => {
            assert_eq!(missing, vec!["roles:create", "roles:delete"]);
        }
        other => panic!("Expected MissingScopes, got: {:?}", other.map(|c| c.id())),
    }

    Ok(())
}

/// Tests a user without any role.
///
/// Expected: Err(MissingScopes) for a scoped endpoint, Ok for an authenticated-only one
#[tokio::test]
async fn user_without_roles_has_no_scopes() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let guard = AuthGuard::new(db, session);

    let denied = guard.require(&[Permission::Scope("users:me")]).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    let current = guard.require(&[]).await?;
    assert!(current.scopes.is_empty());

    Ok(())
}

/// Tests a request without a logged-in user.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn denies_anonymous_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a user that no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn denies_deleted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}

/// Tests that deactivated accounts are rejected even when they hold the scope.
///
/// Expected: Err(AuthError::UserInactive)
#[tokio::test]
async fn denies_inactive_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db).active(false).build().await?;
    let role = factory::create_role(db).await?;
    let scope = factory::scope::find_or_create_scope(db, "chat:create").await?;
    factory::role::grant_scope(db, role.id, scope.id).await?;
    factory::assign_role(db, user.id, role.id).await?;

    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Scope("chat:create")])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(id))) if id == user.id
    ));

    Ok(())
}
