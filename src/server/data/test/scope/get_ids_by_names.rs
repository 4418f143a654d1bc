use super::*;

/// Tests looking up scope ids by full name.
///
/// Expected: Ok with the ids of known names, unknown names skipped
#[tokio::test]
async fn finds_known_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::scope::find_or_create_scope(db, "users:me").await?;
    let chat = factory::scope::find_or_create_scope(db, "chat:create").await?;

    let mut ids = ScopeRepository::new(db)
        .get_ids_by_names(&["users:me", "chat:create", "missing:scope"])
        .await?;
    ids.sort_unstable();

    let mut expected = vec![me.id, chat.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests paging through scopes.
///
/// Expected: Ok with scopes ordered by app name then value
#[tokio::test]
async fn pages_in_name_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["users:me", "chat:create", "chat:all"] {
        factory::scope::find_or_create_scope(db, name).await?;
    }

    let page = ScopeRepository::new(db)
        .get_paginated(PageParams::new(0, 2))
        .await?;

    assert_eq!(page.total, 3);
    let names: Vec<String> = page.items.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["chat:all", "chat:create"]);

    Ok(())
}
