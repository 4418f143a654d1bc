use super::*;

/// Tests resolving the scope subset of an app.
///
/// Expected: Ok with only the scopes granted to that app
#[tokio::test]
async fn resolves_app_scopes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let app = factory::app::AppFactory::new(db, owner.id).build().await?;
    let other = factory::app::AppFactory::new(db, owner.id).build().await?;

    let admins = factory::scope::find_or_create_scope(db, "sourcemod_admins:all").await?;
    let servers = factory::scope::find_or_create_scope(db, "sourcemod_servers:all").await?;
    factory::app::grant_app_scope(db, app.id, admins.id).await?;
    factory::app::grant_app_scope(db, other.id, servers.id).await?;

    let scopes = ScopeRepository::new(db).get_names_for_app(app.id).await?;

    assert_eq!(scopes.into_vec(), vec!["sourcemod_admins:all".to_string()]);

    Ok(())
}

/// Tests an app without scopes.
///
/// Expected: Ok with an empty set
#[tokio::test]
async fn returns_empty_for_app_without_scopes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_app_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let app = factory::app::AppFactory::new(db, owner.id).build().await?;

    assert!(ScopeRepository::new(db)
        .get_names_for_app(app.id)
        .await?
        .is_empty());

    Ok(())
}
