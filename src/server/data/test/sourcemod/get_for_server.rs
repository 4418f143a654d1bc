use super::*;

/// Tests the admins returned for a server.
///
/// Verifies that admins scoped to the server and global admins are included, admins of
/// other servers are not, and the list is ordered by immunity.
///
/// Expected: Ok with server and global admins, highest immunity first
#[tokio::test]
async fn returns_server_and_global_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::sourcemod::create_server(db).await?;
    let other = factory::sourcemod::create_server(db).await?;

    let local = factory::sourcemod::AdminFactory::new(db)
        .immunity(10)
        .server(server.id)
        .build()
        .await?;
    let global = factory::sourcemod::AdminFactory::new(db)
        .immunity(50)
        .build()
        .await?;
    factory::sourcemod::AdminFactory::new(db)
        .immunity(90)
        .server(other.id)
        .build()
        .await?;

    let admins = AdminRepository::new(db).get_for_server(server.id).await?;

    let ids: Vec<i32> = admins.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![global.id, local.id]);

    Ok(())
}

/// Tests that group names are resolved.
///
/// Expected: Ok with the group's name on the member
#[tokio::test]
async fn includes_group_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::sourcemod::create_server(db).await?;
    let group = factory::sourcemod::create_group(db, "bck", 20).await?;
    factory::sourcemod::AdminFactory::new(db)
        .group(group.id)
        .server(server.id)
        .build()
        .await?;

    let admins = AdminRepository::new(db).get_for_server(server.id).await?;

    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].group_name.as_deref(), Some(group.name.as_str()));

    Ok(())
}
