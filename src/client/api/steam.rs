use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::steam::{LinkSteamDto, SteamProfileDto},
};

impl ApiClient {
    /// Links a Steam account given in any supported id format.
    pub async fn link_steam(&self, steam_id: &str) -> Result<SteamProfileDto, ApiError> {
        let response = self
            .post("/api/steam/me")
            .json(&LinkSteamDto {
                steam_id: steam_id.to_string(),
            })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_my_steam(&self) -> Result<SteamProfileDto, ApiError> {
        let response = self.get("/api/steam/me").send().await?;
        parse_response(response).await
    }

    pub async fn refresh_steam(&self) -> Result<SteamProfileDto, ApiError> {
        let response = self.post("/api/steam/me/refresh").send().await?;
        parse_response(response).await
    }

    pub async fn unlink_steam(&self) -> Result<(), ApiError> {
        let response = self.delete("/api/steam/me").send().await?;
        parse_empty_response(response).await
    }
}
