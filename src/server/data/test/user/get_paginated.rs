use super::*;

/// Tests pagination with multiple pages.
///
/// Verifies that the repository returns the requested slice ordered by id along with
/// the total item count and page count.
///
/// Expected: Ok with correct page of users and totals
#[tokio::test]
async fn returns_correct_page_of_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(factory::create_user(db).await?.id);
    }

    let repo = UserRepository::new(db);

    let first = repo.get_paginated(PageParams::new(0, 2)).await?;
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items[0].id, ids[0]);

    let last = repo.get_paginated(PageParams::new(2, 2)).await?;
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].id, ids[4]);

    Ok(())
}

/// Tests pagination with an empty table.
///
/// Expected: Ok with no items and zero totals
#[tokio::test]
async fn returns_empty_page() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let page = UserRepository::new(db)
        .get_paginated(PageParams::default())
        .await?;

    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);

    Ok(())
}
