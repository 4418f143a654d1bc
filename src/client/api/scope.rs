use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        scope::{CreateScopeDto, ScopeDto, UpdateScopeDto},
    },
};

impl ApiClient {
    pub async fn create_scope(&self, payload: &CreateScopeDto) -> Result<ScopeDto, ApiError> {
        let response = self.post("/api/scopes").json(payload).send().await?;
        parse_response(response).await
    }

    pub async fn get_scopes(&self, page: u64, entries: u64) -> Result<PaginatedDto<ScopeDto>, ApiError> {
        let response = self.get_page("/api/scopes", page, entries).send().await?;
        parse_response(response).await
    }

    pub async fn get_scope(&self, id: i32) -> Result<ScopeDto, ApiError> {
        let response = self.get(&format!("/api/scopes/{}", id)).send().await?;
        parse_response(response).await
    }

    pub async fn update_scope_description(
        &self,
        id: i32,
        description: &str,
    ) -> Result<ScopeDto, ApiError> {
        let response = self
            .put(&format!("/api/scopes/{}", id))
            .json(&UpdateScopeDto {
                description: description.to_string(),
            })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_scope(&self, id: i32) -> Result<(), ApiError> {
        let response = self.delete(&format!("/api/scopes/{}", id)).send().await?;
        parse_empty_response(response).await
    }
}
