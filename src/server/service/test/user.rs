use super::*;
use crate::server::{
    data::role::RoleRepository, model::scope::ScopeSet, service::user::UserService,
};

/// Tests paging through users.
///
/// Expected: requested page size, correct totals and roles attached
#[tokio::test]
async fn pages_users_with_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    for _ in 0..5 {
        let user = factory::create_user(db).await?;
        factory::assign_role(db, user.id, role.id).await?;
    }

    let service = UserService::new(db);
    let page = service.get_paginated(PageParams::new(1, 2)).await?;

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert!(page.items.iter().all(|u| u.roles.len() == 1));

    Ok(())
}

/// Tests replacing a user's roles.
///
/// Expected: roles replaced, unknown ids rejected without changes
#[tokio::test]
async fn sets_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_role(db).await?;
    let second = factory::create_role(db).await?;
    factory::assign_role(db, user.id, first.id).await?;

    let service = UserService::new(db);
    let granter = ScopeSet::new();

    let updated = service
        .set_roles(user.id, &[second.id], &granter)
        .await?
        .unwrap();
    let ids: Vec<i32> = updated.roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id]);

    assert!(matches!(
        service.set_roles(user.id, &[first.id, 4242], &granter).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(
        RoleRepository::new(db).get_for_user(user.id).await?.len(),
        1
    );

    assert!(service.set_roles(4242, &[], &granter).await?.is_none());

    Ok(())
}

/// Tests assigning and removing roles that grant more than the acting user holds.
///
/// Expected: MissingScopes for the Admin role in either direction; unchanged roles pass
#[tokio::test]
async fn role_changes_are_capped_by_granter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let moderator = factory::create_user_with_scopes(db, &["users:update"]).await?;
    let granter = crate::server::data::scope::ScopeRepository::new(db)
        .get_names_for_user(moderator.id)
        .await?;
    let moderator_role = RoleRepository::new(db).get_for_user(moderator.id).await?[0].clone();

    let admin_role = factory::create_role(db).await?;
    let delete_scope = factory::scope::find_or_create_scope(db, "users:delete").await?;
    factory::role::grant_scope(db, admin_role.id, delete_scope.id).await?;

    let service = UserService::new(db);

    match service
        .set_roles(moderator.id, &[moderator_role.id, admin_role.id], &granter)
        .await
    {
        Err(AppError::AuthErr(AuthError::MissingScopes { missing })) => {
            assert_eq!(missing, vec!["users:delete".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let admin = factory::create_user(db).await?;
    factory::assign_role(db, admin.id, admin_role.id).await?;
    assert!(matches!(
        service.set_roles(admin.id, &[], &granter).await,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    let plain = factory::create_role(db).await?;
    let updated = service
        .set_roles(admin.id, &[admin_role.id, plain.id], &granter)
        .await?
        .unwrap();
    assert_eq!(updated.roles.len(), 2);

    Ok(())
}

/// Tests deactivating a user.
///
/// Expected: flag stored, None for a missing user
#[tokio::test]
async fn deactivates_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let service = UserService::new(db);

    let updated = service.set_active(user.id, false).await?.unwrap();
    assert!(!updated.is_active);

    assert!(service.set_active(4242, false).await?.is_none());

    Ok(())
}

/// Tests deleting a user who authored forum content.
///
/// Expected: account and its threads are removed
#[tokio::test]
async fn deleting_user_removes_authored_content() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, user.id).await?;

    let service = UserService::new(db);
    assert!(service.delete(user.id).await?);
    assert!(service.get_by_id(user.id).await?.is_none());

    let thread = crate::server::data::forum::thread::ThreadRepository::new(db)
        .find_entity(thread.id)
        .await?;
    assert!(thread.is_none());

    assert!(!service.delete(user.id).await?);

    Ok(())
}
