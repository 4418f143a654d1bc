use super::*;

fn client_headers(client_id: &str, secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CLIENT_ID_HEADER, HeaderValue::from_str(client_id).unwrap());
    headers.insert(CLIENT_SECRET_HEADER, HeaderValue::from_str(secret).unwrap());
    headers
}

/// Tests an app authenticating with valid credentials and an assigned scope.
///
/// Expected: Ok(Principal::App)
#[tokio::test]
async fn authenticates_app_with_assigned_scope() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user_with_scopes(db, &["sourcemod_admins:all"]).await?;
    let app = factory::app::AppFactory::new(db, owner.id)
        .client_id("plugin")
        .build()
        .await?;
    let scope = factory::scope::find_or_create_scope(db, "sourcemod_admins:all").await?;
    factory::app::grant_app_scope(db, app.id, scope.id).await?;

    let headers = client_headers("plugin", factory::app::DEFAULT_SECRET);
    let principal = PrincipalGuard::new(db, session, &headers)
        .require(&["sourcemod_admins:all"])
        .await?;

    match principal {
        Principal::App { app: found, scopes } => {
            assert_eq!(found.id, app.id);
            assert!(scopes.contains("sourcemod_admins:all"));
        }
        Principal::User(_) => panic!("Expected app principal"),
    }

    Ok(())
}

/// Tests a wrong secret and an unknown client id.
///
/// Expected: Err(AuthError::InvalidAppCredentials) for both
#[tokio::test]
async fn rejects_invalid_credentials() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user(db).await?;
    factory::app::AppFactory::new(db, owner.id)
        .client_id("plugin")
        .build()
        .await?;

    for headers in [
        client_headers("plugin", "wrong-secret"),
        client_headers("unknown", factory::app::DEFAULT_SECRET),
    ] {
        let result = PrincipalGuard::new(db, session, &headers).require(&[]).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidAppCredentials))
        ));
    }

    Ok(())
}

/// Tests that an app cannot use a scope its owner no longer holds.
///
/// Expected: Err(AuthError::MissingScopes)
#[tokio::test]
async fn app_scopes_are_capped_by_owner() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user(db).await?;
    let app = factory::app::AppFactory::new(db, owner.id)
        .client_id("plugin")
        .build()
        .await?;
    let scope = factory::scope::find_or_create_scope(db, "servers:all").await?;
    factory::app::grant_app_scope(db, app.id, scope.id).await?;

    let headers = client_headers("plugin", factory::app::DEFAULT_SECRET);
    let result = PrincipalGuard::new(db, session, &headers)
        .require(&["servers:all"])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    Ok(())
}

/// Tests that requests without client headers fall back to the session user.
///
/// Expected: Ok(Principal::User)
#[tokio::test]
async fn falls_back_to_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user_with_scopes(db, &["servers:all"]).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let headers = HeaderMap::new();
    let principal = PrincipalGuard::new(db, session, &headers)
        .require(&["servers:all"])
        .await?;

    assert!(matches!(principal, Principal::User(ref current) if current.id() == user.id));
    assert!(principal.scopes().contains("servers:all"));

    Ok(())
}
