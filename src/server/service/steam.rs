//! Linking Steam accounts through the Steam Web API.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::steam::SteamProfileRepository,
    error::AppError,
    model::steam::{PlayerSummariesResponse, PlayerSummary, SteamProfile},
    util::{parse::parse_stored_steam_id, steam_id::SteamId},
};

const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";

pub struct SteamService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    api_key: Option<&'a str>,
    api_url: &'a str,
}

impl<'a> SteamService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        api_key: Option<&'a str>,
        api_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            api_key,
            api_url,
        }
    }

    /// Links the Steam account described by `input` to `user_id`, replacing any previous
    /// link of that user.
    ///
    /// # Returns
    /// - `Ok(SteamProfile)` - Stored profile with fresh Steam data
    /// - `Err(AppError::BadRequest)` - Unparsable id or no API key configured
    /// - `Err(AppError::Conflict)` - Account already linked to another user
    /// - `Err(AppError::NotFound)` - Steam knows no such account
    pub async fn link(&self, user_id: i32, input: &str) -> Result<SteamProfile, AppError> {
        let steam_id = SteamId::parse(input)?;
        let repo = SteamProfileRepository::new(self.db);

        if let Some(existing) = repo.find_by_steam_id(steam_id).await? {
            if existing.user_id != user_id {
                return Err(AppError::Conflict(format!(
                    "Steam account {} is already linked to another user",
                    steam_id
                )));
            }
        }

        let summary = self.fetch_player_summary(steam_id).await?;
        let profile = repo.upsert(user_id, steam_id, summary).await?;
        tracing::info!("User {} linked Steam account {}", user_id, steam_id);

        SteamProfile::from_entity(profile)
    }

    pub async fn get_mine(&self, user_id: i32) -> Result<Option<SteamProfile>, AppError> {
        SteamProfileRepository::new(self.db)
            .find_by_user(user_id)
            .await?
            .map(SteamProfile::from_entity)
            .transpose()
    }

    /// # Returns
    /// - `Ok(true)` - Link removed
    /// - `Ok(false)` - User had no linked account
    pub async fn unlink(&self, user_id: i32) -> Result<bool, AppError> {
        Ok(SteamProfileRepository::new(self.db)
            .delete_by_user(user_id)
            .await?)
    }

    /// Re-fetches name, avatar and country for the user's linked account.
    ///
    /// # Returns
    /// - `Ok(None)` - User has no linked account
    pub async fn refresh(&self, user_id: i32) -> Result<Option<SteamProfile>, AppError> {
        let repo = SteamProfileRepository::new(self.db);

        let Some(existing) = repo.find_by_user(user_id).await? else {
            return Ok(None);
        };

        let steam_id = parse_stored_steam_id(existing.steamid64)?;
        let summary = self.fetch_player_summary(steam_id).await?;
        let profile = repo.upsert(user_id, steam_id, summary).await?;

        SteamProfile::from_entity(profile).map(Some)
    }

    async fn fetch_player_summary(&self, steam_id: SteamId) -> Result<PlayerSummary, AppError> {
        let Some(api_key) = self.api_key else {
            return Err(AppError::BadRequest(
                "Steam integration is not configured".to_string(),
            ));
        };

        let id64 = steam_id.id64().to_string();

        let response = self
            .http_client
            .get(format!(
                "{}{}",
                self.api_url.trim_end_matches('/'),
                PLAYER_SUMMARIES_PATH
            ))
            .query(&[("key", api_key), ("steamids", id64.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<PlayerSummariesResponse>()
            .await?;

        response
            .response
            .players
            .into_iter()
            .find(|player| player.steamid == id64)
            .ok_or_else(|| AppError::NotFound(format!("Steam account {} not found", id64)))
    }
}
