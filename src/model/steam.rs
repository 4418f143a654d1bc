use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SteamProfileDto {
    /// 64-bit Steam id, serialized as a string to survive JavaScript clients.
    pub steamid64: String,
    pub steam2: String,
    pub steam3: String,
    pub username: String,
    pub profile_url: String,
    pub avatar_url: String,
    pub country_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Accepts a 64-bit id, `STEAM_X:Y:Z`, `[U:1:N]` or a `/profiles/<id>` URL.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LinkSteamDto {
    pub steam_id: String,
}
