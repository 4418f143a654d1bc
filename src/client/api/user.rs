use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        api::PaginatedDto,
        user::{SetUserRolesDto, UpdateMeDto, UpdateUserDto, UserDto},
    },
};

impl ApiClient {
    pub async fn update_me(&self, payload: &UpdateMeDto) -> Result<UserDto, ApiError> {
        let response = self.put("/api/users/me").json(payload).send().await?;
        parse_response(response).await
    }

    pub async fn get_users(&self, page: u64, entries: u64) -> Result<PaginatedDto<UserDto>, ApiError> {
        let response = self.get_page("/api/users", page, entries).send().await?;
        parse_response(response).await
    }

    pub async fn get_user(&self, id: i32) -> Result<UserDto, ApiError> {
        let response = self.get(&format!("/api/users/{}", id)).send().await?;
        parse_response(response).await
    }

    pub async fn set_user_active(&self, id: i32, is_active: bool) -> Result<UserDto, ApiError> {
        let response = self
            .put(&format!("/api/users/{}", id))
            .json(&UpdateUserDto { is_active })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn set_user_roles(&self, id: i32, role_ids: Vec<i32>) -> Result<UserDto, ApiError> {
        let response = self
            .put(&format!("/api/users/{}/roles", id))
            .json(&SetUserRolesDto { role_ids })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<(), ApiError> {
        let response = self.delete(&format!("/api/users/{}", id)).send().await?;
        parse_empty_response(response).await
    }
}
