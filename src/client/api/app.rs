use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        app::{AppDto, CreateAppDto, CreatedAppDto, UpdateAppDto},
        scope::SetScopesDto,
    },
};

impl ApiClient {
    /// The returned `client_secret` cannot be fetched again.
    pub async fn create_app(&self, payload: &CreateAppDto) -> Result<CreatedAppDto, ApiError> {
        let response = self.post("/api/apps").json(payload).send().await?;
        parse_response(response).await
    }

    pub async fn get_apps(&self, page: u64, entries: u64) -> Result<PaginatedDto<AppDto>, ApiError> {
        let response = self.get_page("/api/apps", page, entries).send().await?;
        parse_response(response).await
    }

    pub async fn get_app(&self, id: i32) -> Result<AppDto, ApiError> {
        let response = self.get(&format!("/api/apps/{}", id)).send().await?;
        parse_response(response).await
    }

    pub async fn update_app(&self, id: i32, payload: &UpdateAppDto) -> Result<AppDto, ApiError> {
        let response = self
            .put(&format!("/api/apps/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn set_app_scopes(&self, id: i32, scope_ids: Vec<i32>) -> Result<AppDto, ApiError> {
        let response = self
            .put(&format!("/api/apps/{}/scopes", id))
            .json(&SetScopesDto { scope_ids })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_app(&self, id: i32) -> Result<(), ApiError> {
        let response = self.delete(&format!("/api/apps/{}", id)).send().await?;
        parse_empty_response(response).await
    }
}
