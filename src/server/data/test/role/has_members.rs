use super::*;

/// Tests membership detection and duplicate assignment.
///
/// Expected: false before assignment, true after, assigning twice keeps one row
#[tokio::test]
async fn detects_members() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    let repo = RoleRepository::new(db);

    assert!(!repo.has_members(role.id).await?);

    repo.add_user_role(user.id, role.id).await?;
    repo.add_user_role(user.id, role.id).await?;

    assert!(repo.has_members(role.id).await?);
    assert_eq!(repo.get_for_user(user.id).await?.len(), 1);

    Ok(())
}
