use crate::{
    client::{
        helper::{parse_empty_response, parse_response},
        ApiClient, ApiError,
    },
    model::{
        auth::{CurrentUserDto, LoginDto, RegisterDto},
        user::UserDto,
    },
};

impl ApiClient {
    pub async fn register(&self, payload: &RegisterDto) -> Result<UserDto, ApiError> {
        let response = self.post("/api/auth/register").json(payload).send().await?;
        parse_response(response).await
    }

    /// Logs in with a username or email. The session cookie is kept for later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserDto, ApiError> {
        let payload = LoginDto {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self.post("/api/auth/login").json(&payload).send().await?;
        parse_response(response).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.post("/api/auth/logout").send().await?;
        parse_empty_response(response).await
    }

    pub async fn me(&self) -> Result<CurrentUserDto, ApiError> {
        let response = self.get("/api/auth/me").send().await?;
        parse_response(response).await
    }
}
