use super::*;

/// Tests lookup by username and email.
///
/// Expected: Ok(Some) for existing values, Ok(None) otherwise
#[tokio::test]
async fn finds_by_username_and_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("shark")
        .email("shark@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.find_by_username("shark").await?.map(|u| u.id), Some(user.id));
    assert_eq!(
        repo.find_by_email("shark@example.com").await?.map(|u| u.id),
        Some(user.id)
    );
    assert!(repo.find_by_username("whale").await?.is_none());
    assert!(repo.find_by_email("whale@example.com").await?.is_none());

    Ok(())
}
