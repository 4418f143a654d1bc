use super::*;

/// Tests listing posts of a thread.
///
/// Expected: Ok with the thread's posts in creation order
#[tokio::test]
async fn lists_posts_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, author.id).await?;
    let other = factory::create_thread(db, category.id, author.id).await?;

    let first = factory::create_post(db, thread.id, author.id).await?;
    let second = factory::create_post(db, thread.id, author.id).await?;
    factory::create_post(db, other.id, author.id).await?;

    let page = PostRepository::new(db)
        .get_paginated_by_thread(thread.id, PageParams::default())
        .await?;

    let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(page.total, 2);

    Ok(())
}

/// Tests deleting a thread.
///
/// Expected: its posts are removed with it
#[tokio::test]
async fn thread_delete_removes_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, author.id).await?;
    let post = factory::create_post(db, thread.id, author.id).await?;

    ThreadRepository::new(db).delete(thread.id).await?;

    assert!(PostRepository::new(db).find_entity(post.id).await?.is_none());

    Ok(())
}
