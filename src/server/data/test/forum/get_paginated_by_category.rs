use super::*;

/// Tests listing threads of a category.
///
/// Verifies that only the category's threads are returned, each with its author and
/// post count.
///
/// Expected: Ok with the category's threads and accurate post counts
#[tokio::test]
async fn lists_threads_with_post_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::UserFactory::new(db)
        .username("shark")
        .build()
        .await?;
    let category = factory::create_category(db).await?;
    let other = factory::create_category(db).await?;

    let busy = factory::create_thread(db, category.id, author.id).await?;
    let quiet = factory::create_thread(db, category.id, author.id).await?;
    factory::create_thread(db, other.id, author.id).await?;

    factory::create_post(db, busy.id, author.id).await?;
    factory::create_post(db, busy.id, author.id).await?;

    let page = ThreadRepository::new(db)
        .get_paginated_by_category(category.id, PageParams::default())
        .await?;

    assert_eq!(page.total, 2);
    let busy = page.items.iter().find(|t| t.id == busy.id).unwrap();
    let quiet = page.items.iter().find(|t| t.id == quiet.id).unwrap();
    assert_eq!(busy.post_count, 2);
    assert_eq!(quiet.post_count, 0);
    assert_eq!(busy.author.username, "shark");

    Ok(())
}

/// Tests that touching a thread moves it to the front.
///
/// Expected: Ok with the most recently touched thread first
#[tokio::test]
async fn orders_by_last_activity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let older = factory::create_thread(db, category.id, author.id).await?;
    factory::create_thread(db, category.id, author.id).await?;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let repo = ThreadRepository::new(db);
    repo.touch(older.id).await?;

    let page = repo
        .get_paginated_by_category(category.id, PageParams::default())
        .await?;

    assert_eq!(page.items[0].id, older.id);

    Ok(())
}
