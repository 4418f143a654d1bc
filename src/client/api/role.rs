use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        role::{CreateRoleDto, RoleDto, UpdateRoleDto},
        scope::SetScopesDto,
    },
};

impl ApiClient {
    pub async fn create_role(&self, payload: &CreateRoleDto) -> Result<RoleDto, ApiError> {
        let response = self.post("/api/roles").json(payload).send().await?;
        parse_response(response).await
    }

    pub async fn get_roles(&self, page: u64, entries: u64) -> Result<PaginatedDto<RoleDto>, ApiError> {
        let response = self.get_page("/api/roles", page, entries).send().await?;
        parse_response(response).await
    }

    pub async fn get_role(&self, id: i32) -> Result<RoleDto, ApiError> {
        let response = self.get(&format!("/api/roles/{}", id)).send().await?;
        parse_response(response).await
    }

    pub async fn update_role(&self, id: i32, payload: &UpdateRoleDto) -> Result<RoleDto, ApiError> {
        let response = self
            .put(&format!("/api/roles/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Replaces every scope the role grants.
    pub async fn set_role_scopes(&self, id: i32, scope_ids: Vec<i32>) -> Result<RoleDto, ApiError> {
        let response = self
            .put(&format!("/api/roles/{}/scopes", id))
            .json(&SetScopesDto { scope_ids })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_role(&self, id: i32) -> Result<(), ApiError> {
        let response = self.delete(&format!("/api/roles/{}", id)).send().await?;
        parse_empty_response(response).await
    }
}
