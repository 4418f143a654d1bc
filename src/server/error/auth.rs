use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("No user in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The user exists but has been deactivated.
    #[error("User {0} is inactive")]
    UserInactive(i32),

    /// Username or password did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// App client id or secret did not match.
    #[error("Invalid client credentials")]
    InvalidAppCredentials,

    /// The principal's resolved scopes lack one or more required scopes.
    #[error("Missing required scopes: {}", missing.join(", "))]
    MissingScopes { missing: Vec<String> },
}

impl AuthError {
    /// Status and the short message shown to clients.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            Self::InvalidCredentials | Self::InvalidAppCredentials => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::UserInactive(_) => (StatusCode::FORBIDDEN, "Account is inactive".to_string()),
            Self::MissingScopes { .. } => (StatusCode::FORBIDDEN, self.to_string()),
        }
    }
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` /
///   `InvalidAppCredentials` → 401 Unauthorized
/// - `UserInactive` / `MissingScopes` → 403 Forbidden
///
/// Denials are logged at debug level; the client only sees a short message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = self.status_and_message();

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
