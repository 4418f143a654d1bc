use super::*;
use crate::server::{
    data::scope::ScopeRepository,
    middleware::auth::CurrentUser,
    model::forum::{CategoryParams, ThreadParams},
    service::forum::{category::CategoryService, post::PostService, thread::ThreadService},
};

async fn current_user(
    db: &sea_orm::DatabaseConnection,
    user: entity::user::Model,
) -> Result<CurrentUser, AppError> {
    let scopes = ScopeRepository::new(db).get_names_for_user(user.id).await?;
    Ok(CurrentUser { user, scopes })
}

/// Tests category names.
///
/// Expected: Conflict when creating or renaming onto a taken name
#[tokio::test]
async fn category_names_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = CategoryService::new(db);
    let general = service
        .create(CategoryParams {
            name: "General".to_string(),
            description: String::new(),
        })
        .await?;
    let offtopic = service
        .create(CategoryParams {
            name: "Off-topic".to_string(),
            description: String::new(),
        })
        .await?;

    assert!(matches!(
        service
            .create(CategoryParams {
                name: "General".to_string(),
                description: String::new(),
            })
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service
            .update(
                offtopic.id,
                CategoryParams {
                    name: general.name.clone(),
                    description: String::new(),
                },
            )
            .await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests opening a thread in a missing category.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn thread_requires_category() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let result = ThreadService::new(db)
        .create(
            4242,
            author.id,
            ThreadParams {
                title: "Hello".to_string(),
                content: "World".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests posting into a closed thread.
///
/// Expected: BadRequest while closed, Ok after reopening
#[tokio::test]
async fn closed_thread_rejects_posts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::forum::ThreadFactory::new(db, category.id, author.id)
        .closed(true)
        .build()
        .await?;

    let posts = PostService::new(db);
    assert!(matches!(
        posts.create(thread.id, author.id, "Hi".to_string()).await,
        Err(AppError::BadRequest(_))
    ));

    ThreadService::new(db).set_closed(thread.id, false).await?;
    let post = posts.create(thread.id, author.id, "Hi".to_string()).await?;
    assert_eq!(post.author.id, author.id);

    Ok(())
}

/// Tests editing someone else's post.
///
/// Expected: MissingScopes without `posts:update`, Ok with it
#[tokio::test]
async fn post_update_requires_owner_or_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let moderator = factory::create_user_with_scopes(db, &["posts:update"]).await?;

    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, author.id).await?;
    let post = factory::create_post(db, thread.id, author.id).await?;

    let service = PostService::new(db);

    let stranger = current_user(db, stranger).await?;
    assert!(matches!(
        service.update(&stranger, post.id, "Hijacked".to_string()).await,
        Err(AppError::AuthErr(AuthError::MissingScopes { .. }))
    ));

    let author = current_user(db, author).await?;
    let edited = service
        .update(&author, post.id, "Edited".to_string())
        .await?
        .unwrap();
    assert_eq!(edited.content, "Edited");

    let moderator = current_user(db, moderator).await?;
    let moderated = service
        .update(&moderator, post.id, "Moderated".to_string())
        .await?
        .unwrap();
    assert_eq!(moderated.content, "Moderated");

    Ok(())
}

/// Tests deleting a thread as its author.
///
/// Expected: thread and its posts removed
#[tokio::test]
async fn deleting_thread_removes_posts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, author.id).await?;
    let post = factory::create_post(db, thread.id, author.id).await?;

    let author = current_user(db, author).await?;
    assert!(ThreadService::new(db).delete(&author, thread.id).await?);

    assert!(ThreadService::new(db).get_by_id(thread.id).await?.is_none());
    assert!(PostService::new(db).get_by_id(post.id).await?.is_none());

    Ok(())
}

/// Tests deleting a category.
///
/// Expected: its threads are gone as well
#[tokio::test]
async fn deleting_category_removes_threads() -> Result<(), AppError> {
    let test = TestBuilder::new().with_forum_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let thread = factory::create_thread(db, category.id, author.id).await?;

    assert!(CategoryService::new(db).delete(category.id).await?);
    assert!(ThreadService::new(db).get_by_id(thread.id).await?.is_none());
    assert!(!CategoryService::new(db).delete(category.id).await?);

    Ok(())
}
