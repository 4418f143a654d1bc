use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::{client::error::ApiError, model::api::ErrorDto};

/// Decodes a 2xx JSON body, or turns the error body into an `ApiError`.
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;

    response.json::<T>().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to parse response: {}", e),
    })
}

/// For endpoints answering `204 No Content`.
pub async fn parse_empty_response(response: Response) -> Result<(), ApiError> {
    check_status(response).await?;
    Ok(())
}

/// For plain text bodies such as `admins_simple.ini`.
pub async fn parse_text_response(response: Response) -> Result<String, ApiError> {
    let response = check_status(response).await?;

    Ok(response.text().await?)
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorDto>(&body) {
        Ok(error_dto) => error_dto.error,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => body,
    };

    Err(ApiError {
        status: status.as_u16(),
        message,
    })
}
