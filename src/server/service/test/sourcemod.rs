use super::*;
use crate::server::{
    model::sourcemod::{AdminParams, GroupParams, ServerParams},
    service::sourcemod::{admin::AdminService, group::GroupService, server::ServerService},
};

fn admin_params(identity: &str) -> AdminParams {
    AdminParams {
        name: "Admin".to_string(),
        identity: identity.to_string(),
        flags: "b".to_string(),
        immunity_level: 10,
        group_id: None,
        server_id: None,
        user_id: None,
    }
}

/// Tests admin references to missing records.
///
/// Expected: BadRequest for an unknown group, server or user
#[tokio::test]
async fn admin_references_must_exist() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AdminService::new(db);

    for params in [
        AdminParams {
            group_id: Some(4242),
            ..admin_params("STEAM_0:0:1")
        },
        AdminParams {
            server_id: Some(4242),
            ..admin_params("STEAM_0:0:1")
        },
        AdminParams {
            user_id: Some(4242),
            ..admin_params("STEAM_0:0:1")
        },
    ] {
        assert!(matches!(
            service.create(params).await,
            Err(AppError::BadRequest(_))
        ));
    }

    Ok(())
}

/// Tests the admins effective on a server.
///
/// Expected: server admins plus global ones, highest immunity first, others excluded
#[tokio::test]
async fn server_admins_include_globals() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::sourcemod::create_server(db).await?;
    let other = factory::sourcemod::create_server(db).await?;

    let global = factory::sourcemod::AdminFactory::new(db)
        .flags("z")
        .immunity(99)
        .build()
        .await?;
    let local = factory::sourcemod::AdminFactory::new(db)
        .flags("b")
        .server(server.id)
        .build()
        .await?;
    factory::sourcemod::AdminFactory::new(db)
        .server(other.id)
        .build()
        .await?;

    let (found, admins) = ServerService::new(db).get_admins(server.id).await?.unwrap();

    assert_eq!(found.id, server.id);
    let ids: Vec<i32> = admins.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![global.id, local.id]);

    assert!(ServerService::new(db).get_admins(4242).await?.is_none());

    Ok(())
}

/// Tests rendering `admins_simple.ini`.
///
/// Expected: header with the server name, group members reference their group
#[tokio::test]
async fn renders_admins_simple() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = ServerService::new(db)
        .create(ServerParams {
            name: "Jailbreak".to_string(),
            ip: "10.0.0.1".to_string(),
            port: 27015,
        })
        .await?;
    let group = GroupService::new(db)
        .create(GroupParams {
            name: "Moderators".to_string(),
            flags: "bck".to_string(),
            immunity_level: 20,
        })
        .await?;

    let admins = AdminService::new(db);
    admins
        .create(AdminParams {
            flags: String::new(),
            group_id: Some(group.id),
            server_id: Some(server.id),
            ..admin_params("STEAM_0:1:4")
        })
        .await?;
    admins
        .create(AdminParams {
            flags: "z".to_string(),
            immunity_level: 100,
            ..admin_params("STEAM_0:0:11101")
        })
        .await?;

    let ini = ServerService::new(db)
        .render_admins_simple(server.id)
        .await?
        .unwrap();

    assert!(ini.starts_with("// admins_simple.ini for Jailbreak\n"));
    assert!(ini.contains("\"STEAM_0:0:11101\" \"100:z\"\n"));
    assert!(ini.contains("\"STEAM_0:1:4\" \"@Moderators\"\n"));

    Ok(())
}

/// Tests that names containing line breaks never reach the ini file.
///
/// Expected: BadRequest from validation; rows written directly render on one line
#[tokio::test]
async fn multiline_names_cannot_add_ini_lines() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let injected = "Public\n\"STEAM_0:0:1\" \"99:z\"";
    let result = ServerParams::from_dto(crate::model::sourcemod::ServerPayloadDto {
        name: injected.to_string(),
        ip: "10.0.0.1".to_string(),
        port: 27015,
    });
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let server = ServerService::new(db)
        .create(ServerParams {
            name: injected.to_string(),
            ip: "10.0.0.1".to_string(),
            port: 27015,
        })
        .await?;
    AdminService::new(db)
        .create(AdminParams {
            name: "Shark\r\n\"STEAM_0:0:2\" \"99:z\"".to_string(),
            server_id: Some(server.id),
            ..admin_params("STEAM_0:1:4")
        })
        .await?;

    let ini = ServerService::new(db)
        .render_admins_simple(server.id)
        .await?
        .unwrap();

    assert_eq!(ini.lines().count(), 3);
    assert!(!ini.lines().any(|line| line.starts_with("\"STEAM_0:0:1\"")));
    assert!(!ini.lines().any(|line| line.starts_with("\"STEAM_0:0:2\"")));
    assert!(ini.contains("\"STEAM_0:1:4\" \"10:b\"\n"));

    Ok(())
}

/// Tests deleting a group.
///
/// Expected: members stay with their own flags and no group
#[tokio::test]
async fn deleting_group_detaches_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::sourcemod::create_group(db, "b", 10).await?;
    let member = factory::sourcemod::AdminFactory::new(db)
        .flags("c")
        .group(group.id)
        .build()
        .await?;

    assert!(GroupService::new(db).delete(group.id).await?);

    let member = AdminService::new(db).get_by_id(member.id).await?.unwrap();
    assert_eq!(member.group_id, None);
    assert_eq!(member.group_name, None);
    assert_eq!(member.flags, "c");

    Ok(())
}

/// Tests deleting a server.
///
/// Expected: its admins are removed, global admins survive
#[tokio::test]
async fn deleting_server_removes_its_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::sourcemod::create_server(db).await?;
    let local = factory::sourcemod::AdminFactory::new(db)
        .server(server.id)
        .build()
        .await?;
    let global = factory::sourcemod::AdminFactory::new(db).build().await?;

    assert!(ServerService::new(db).delete(server.id).await?);

    let admins = AdminService::new(db);
    assert!(admins.get_by_id(local.id).await?.is_none());
    assert!(admins.get_by_id(global.id).await?.is_some());

    Ok(())
}

/// Tests group name uniqueness.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn group_names_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = GroupService::new(db);
    let params = GroupParams {
        name: "VIP".to_string(),
        flags: "a".to_string(),
        immunity_level: 0,
    };

    service.create(params.clone()).await?;

    assert!(matches!(
        service.create(params).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests listing servers with the largest possible page number.
///
/// Expected: Ok with an empty page instead of an offset overflow
#[tokio::test]
async fn lists_servers_far_past_the_end() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sourcemod_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::sourcemod::create_server(db).await?;

    let page = ServerService::new(db)
        .get_paginated(PageParams::new(u64::MAX, 10))
        .await?;

    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);

    Ok(())
}
