use crate::{
    client::{
        helper::{parse_empty_response, parse_response, parse_text_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        sourcemod::{
            AdminDto, AdminPayloadDto, GroupDto, GroupPayloadDto, ServerDto, ServerPayloadDto,
        },
    },
};

impl ApiClient {
    // servers

    pub async fn create_server(&self, payload: &ServerPayloadDto) -> Result<ServerDto, ApiError> {
        let response = self
            .post("/api/sourcemod/servers")
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_servers(
        &self,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<ServerDto>, ApiError> {
        let response = self
            .get_page("/api/sourcemod/servers", page, entries)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_server(&self, id: i32) -> Result<ServerDto, ApiError> {
        let response = self
            .get(&format!("/api/sourcemod/servers/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_server(
        &self,
        id: i32,
        payload: &ServerPayloadDto,
    ) -> Result<ServerDto, ApiError> {
        let response = self
            .put(&format!("/api/sourcemod/servers/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_server(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/sourcemod/servers/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }

    /// Own and global admins of a server. Works with app credentials.
    pub async fn get_server_admins(&self, server_id: i32) -> Result<Vec<AdminDto>, ApiError> {
        let response = self
            .get(&format!("/api/sourcemod/servers/{}/admins", server_id))
            .send()
            .await?;
        parse_response(response).await
    }

    /// The server's `admins_simple.ini`. Works with app credentials.
    pub async fn get_admins_simple_ini(&self, server_id: i32) -> Result<String, ApiError> {
        let response = self
            .get(&format!(
                "/api/sourcemod/servers/{}/admins_simple.ini",
                server_id
            ))
            .send()
            .await?;
        parse_text_response(response).await
    }

    // groups

    pub async fn create_group(&self, payload: &GroupPayloadDto) -> Result<GroupDto, ApiError> {
        let response = self
            .post("/api/sourcemod/groups")
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_groups(
        &self,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<GroupDto>, ApiError> {
        let response = self
            .get_page("/api/sourcemod/groups", page, entries)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_group(&self, id: i32) -> Result<GroupDto, ApiError> {
        let response = self
            .get(&format!("/api/sourcemod/groups/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_group(&self, id: i32, payload: &GroupPayloadDto) -> Result<GroupDto, ApiError> {
        let response = self
            .put(&format!("/api/sourcemod/groups/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_group(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/sourcemod/groups/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }

    // admins

    pub async fn create_admin(&self, payload: &AdminPayloadDto) -> Result<AdminDto, ApiError> {
        let response = self
            .post("/api/sourcemod/admins")
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_admins(
        &self,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<AdminDto>, ApiError> {
        let response = self
            .get_page("/api/sourcemod/admins", page, entries)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_admin(&self, id: i32) -> Result<AdminDto, ApiError> {
        let response = self
            .get(&format!("/api/sourcemod/admins/{}", id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_admin(&self, id: i32, payload: &AdminPayloadDto) -> Result<AdminDto, ApiError> {
        let response = self
            .put(&format!("/api/sourcemod/admins/{}", id))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_admin(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/sourcemod/admins/{}", id))
            .send()
            .await?;
        parse_empty_response(response).await
    }
}
