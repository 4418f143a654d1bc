//! Steam profile domain models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::steam::SteamProfileDto,
    server::{error::AppError, util::parse::parse_stored_steam_id},
};

/// Steam account linked to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamProfile {
    pub user_id: i32,
    pub steamid64: u64,
    pub steam2: String,
    pub steam3: String,
    pub username: String,
    pub profile_url: String,
    pub avatar_url: String,
    pub country_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SteamProfile {
    /// # Returns
    /// - `Ok(SteamProfile)` - Converted profile
    /// - `Err(AppError::InternalErr(InvalidStoredSteamId))` - Stored id is corrupt
    pub fn from_entity(entity: entity::steam_profile::Model) -> Result<Self, AppError> {
        let steam_id = parse_stored_steam_id(entity.steamid64)?;

        Ok(Self {
            user_id: entity.user_id,
            steamid64: steam_id.id64(),
            steam2: entity.steam2,
            steam3: entity.steam3,
            username: entity.username,
            profile_url: entity.profile_url,
            avatar_url: entity.avatar_url,
            country_code: entity.country_code,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> SteamProfileDto {
        SteamProfileDto {
            steamid64: self.steamid64.to_string(),
            steam2: self.steam2,
            steam3: self.steam3,
            username: self.username,
            profile_url: self.profile_url,
            avatar_url: self.avatar_url,
            country_code: self.country_code,
            updated_at: self.updated_at,
        }
    }
}

/// Player fields read from `ISteamUser/GetPlayerSummaries/v2`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,
    pub personaname: String,
    pub profileurl: String,
    #[serde(default)]
    pub avatarfull: String,
    #[serde(default)]
    pub loccountrycode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSummariesResponse {
    pub response: PlayerSummariesBody,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSummariesBody {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}
