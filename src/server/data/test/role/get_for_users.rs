use super::*;

/// Tests loading roles for several users at once.
///
/// Expected: Ok with each user's roles ordered by id, users without roles absent
#[tokio::test]
async fn groups_roles_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let carol = factory::create_user(db).await?;

    let first = factory::create_role(db).await?;
    let second = factory::create_role(db).await?;
    factory::assign_role(db, alice.id, second.id).await?;
    factory::assign_role(db, alice.id, first.id).await?;
    factory::assign_role(db, bob.id, second.id).await?;

    let by_user = RoleRepository::new(db)
        .get_for_users(&[alice.id, bob.id, carol.id])
        .await?;

    let alice_roles: Vec<i32> = by_user[&alice.id].iter().map(|r| r.id).collect();
    assert_eq!(alice_roles, vec![first.id, second.id]);
    assert_eq!(by_user[&bob.id].len(), 1);
    assert!(!by_user.contains_key(&carol.id));

    Ok(())
}

/// Tests the empty input shortcut.
///
/// Expected: Ok with an empty map
#[tokio::test]
async fn returns_empty_map_for_no_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(RoleRepository::new(db).get_for_users(&[]).await?.is_empty());

    Ok(())
}
