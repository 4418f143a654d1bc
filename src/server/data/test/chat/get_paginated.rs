use super::*;

/// Tests message history.
///
/// Expected: Ok with newest messages first and authors resolved
#[tokio::test]
async fn returns_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::UserFactory::new(db)
        .username("shark")
        .build()
        .await?;
    let repo = ChatRepository::new(db);

    let first = repo.create(&author, "first".to_string()).await?;
    let second = repo.create(&author, "second".to_string()).await?;

    let page = repo.get_paginated(PageParams::default()).await?;

    let ids: Vec<i32> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(page.items[0].author.username, "shark");

    Ok(())
}
