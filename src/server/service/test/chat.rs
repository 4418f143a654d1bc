use super::*;
use crate::server::service::chat::{ChatBroadcaster, ChatService};

/// Tests sending a message with a connected subscriber.
///
/// Expected: message stored trimmed and delivered to the subscriber
#[tokio::test]
async fn send_persists_and_broadcasts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let broadcaster = ChatBroadcaster::default();
    let mut receiver = broadcaster.subscribe();

    let service = ChatService::new(db, &broadcaster);
    let message = service.send(&author, "  hello sharks  ").await?;

    assert_eq!(message.content, "hello sharks");
    assert_eq!(message.author.id, author.id);

    let received = receiver.recv().await.unwrap();
    assert_eq!(received, message);

    let page = service.get_paginated(PageParams::default()).await?;
    assert_eq!(page.total, 1);

    Ok(())
}

/// Tests sending without any subscribers.
///
/// Expected: Ok, the message is still stored
#[tokio::test]
async fn send_without_subscribers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let broadcaster = ChatBroadcaster::default();
    assert_eq!(broadcaster.subscriber_count(), 0);

    let service = ChatService::new(db, &broadcaster);
    service.send(&author, "anyone here?").await?;

    let page = service.get_paginated(PageParams::default()).await?;
    assert_eq!(page.items.len(), 1);

    Ok(())
}

/// Tests blank and oversized messages.
///
/// Expected: BadRequest and nothing stored or broadcast
#[tokio::test]
async fn rejects_invalid_content() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let broadcaster = ChatBroadcaster::default();
    let mut receiver = broadcaster.subscribe();
    let service = ChatService::new(db, &broadcaster);

    assert!(matches!(
        service.send(&author, "   ").await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.send(&author, &"a".repeat(501)).await,
        Err(AppError::BadRequest(_))
    ));

    assert!(receiver.try_recv().is_err());
    assert_eq!(service.get_paginated(PageParams::default()).await?.total, 0);

    Ok(())
}

/// Tests a subscriber that falls behind the channel capacity.
///
/// Expected: Lagged error, then the newest messages are still received
#[tokio::test]
async fn lagging_subscriber_skips_messages() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let broadcaster = ChatBroadcaster::new(2);
    let mut receiver = broadcaster.subscribe();
    let service = ChatService::new(db, &broadcaster);

    for n in 0..4 {
        service.send(&author, &format!("message {}", n)).await?;
    }

    assert!(matches!(
        receiver.recv().await,
        Err(tokio::sync::broadcast::error::RecvError::Lagged(2))
    ));
    assert_eq!(receiver.recv().await.unwrap().content, "message 2");
    assert_eq!(receiver.recv().await.unwrap().content, "message 3");

    Ok(())
}
