use axum::{routing::get, Json, Router};
use serde_json::json;

use super::*;
use crate::server::{
    data::steam::SteamProfileRepository, model::steam::PlayerSummary, service::steam::SteamService,
    util::steam_id::SteamId,
};

const STEAM_ID64: &str = "76561197960287930";

/// Serves a fixed `GetPlayerSummaries` response and returns its base URL.
async fn mock_steam_api() -> String {
    let app = Router::new().route(
        "/ISteamUser/GetPlayerSummaries/v2/",
        get(|| async {
            Json(json!({
                "response": {
                    "players": [{
                        "steamid": STEAM_ID64,
                        "personaname": "Rabscuttle",
                        "profileurl": "https://steamcommunity.com/id/rabscuttle/",
                        "avatarfull": "https://avatars.example/full.jpg",
                        "loccountrycode": "US"
                    }]
                }
            }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn summary(steamid: &str) -> PlayerSummary {
    PlayerSummary {
        steamid: steamid.to_string(),
        personaname: "Existing".to_string(),
        profileurl: String::new(),
        avatarfull: String::new(),
        loccountrycode: None,
    }
}

/// Tests linking through the Steam Web API.
///
/// Expected: profile stored with every id format and the fetched persona
#[tokio::test]
async fn links_profile_from_api() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let api_url = mock_steam_api().await;
    let http = reqwest::Client::new();

    let service = SteamService::new(db, &http, Some("key"), &api_url);
    let profile = service.link(user.id, "STEAM_0:0:11101").await?;

    assert_eq!(profile.steamid64.to_string(), STEAM_ID64);
    assert_eq!(profile.steam2, "STEAM_0:0:11101");
    assert_eq!(profile.steam3, "[U:1:22202]");
    assert_eq!(profile.username, "Rabscuttle");
    assert_eq!(profile.country_code.as_deref(), Some("US"));

    let refreshed = service.refresh(user.id).await?.unwrap();
    assert_eq!(refreshed.steamid64, profile.steamid64);

    assert!(service.unlink(user.id).await?);
    assert!(service.get_mine(user.id).await?.is_none());

    Ok(())
}

/// Tests linking without an API key.
///
/// Expected: Err(BadRequest) and nothing stored
#[tokio::test]
async fn link_requires_api_key() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let http = reqwest::Client::new();

    let service = SteamService::new(db, &http, None, "http://127.0.0.1:9");
    let result = service.link(user.id, STEAM_ID64).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(service.get_mine(user.id).await?.is_none());

    Ok(())
}

/// Tests linking an account that belongs to someone else.
///
/// Expected: Err(Conflict) before any API call
#[tokio::test]
async fn rejects_account_linked_elsewhere() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let steam_id = SteamId::parse(STEAM_ID64)?;
    SteamProfileRepository::new(db)
        .upsert(owner.id, steam_id, summary(STEAM_ID64))
        .await?;

    let http = reqwest::Client::new();
    let result = SteamService::new(db, &http, Some("key"), "http://127.0.0.1:9")
        .link(other.id, "[U:1:22202]")
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests unparsable input and a user without a linked account.
///
/// Expected: BadRequest for garbage, None and false for the unlinked user
#[tokio::test]
async fn handles_invalid_and_missing_links() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let http = reqwest::Client::new();
    let service = SteamService::new(db, &http, Some("key"), "http://127.0.0.1:9");

    assert!(matches!(
        service.link(user.id, "not-a-steam-id").await,
        Err(AppError::BadRequest(_))
    ));
    assert!(service.refresh(user.id).await?.is_none());
    assert!(!service.unlink(user.id).await?);

    Ok(())
}
