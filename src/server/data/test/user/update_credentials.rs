use super::*;

/// Tests a partial credential update.
///
/// Expected: only the provided email changes, the password hash is kept
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.update_credentials(user.id, Some("new@example.com".to_string()), None)
        .await?;

    let updated = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.password_hash, user.password_hash);

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_credentials(4242, None, Some("hash".to_string()))
        .await?;

    assert!(result.is_none());

    Ok(())
}
