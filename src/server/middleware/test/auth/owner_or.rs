use super::*;

/// Tests that the owner passes without holding the fallback scope.
///
/// Expected: Ok(CurrentUser)
#[tokio::test]
async fn owner_passes_without_scope() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[Permission::OwnerOr {
            owner_id: user.id,
            scope: "posts:update",
        }])
        .await?;

    assert_eq!(current.id(), user.id);

    Ok(())
}

/// Tests that anyone else needs the fallback scope.
///
/// Expected: Err(MissingScopes) without the scope, Ok with it
#[tokio::test]
async fn non_owner_needs_scope() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let moderator = factory::create_user_with_scopes(db, &["posts:update"]).await?;

    let permission = Permission::OwnerOr {
        owner_id: owner.id,
        scope: "posts:update",
    };

    AuthSession::new(session).set_user_id(stranger.id).await?;
    let denied = AuthGuard::new(db, session).require(&[permission]).await;
    match denied {
        Err(AppError::AuthErr(AuthError::MissingScopes { missing })) => {
            assert_eq!(missing, vec!["posts:update"]);
        }
        other => panic!("Expected MissingScopes, got: {:?}", other.map(|c| c.id())),
    }

    AuthSession::new(session).set_user_id(moderator.id).await?;
    let current = AuthGuard::new(db, session).require(&[permission]).await?;
    assert_eq!(current.id(), moderator.id);

    Ok(())
}

/// Tests `authorize` against scopes resolved earlier, as used after loading a record.
///
/// Expected: owner check and plain scope are evaluated together
#[tokio::test]
async fn authorize_combines_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user_with_scopes(db, &["threads:update"]).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let current = AuthGuard::new(db, session).require(&[]).await?;

    assert!(current
        .authorize(&[
            Permission::OwnerOr {
                owner_id: user.id,
                scope: "threads:delete",
            },
            Permission::Scope("threads:update"),
        ])
        .is_ok());

    assert_eq!(
        current.authorize(&[Permission::OwnerOr {
            owner_id: user.id + 1,
            scope: "threads:delete",
        }]),
        Err(AuthError::MissingScopes {
            missing: vec!["threads:delete".to_string()]
        })
    );

    Ok(())
}
