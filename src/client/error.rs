use thiserror::Error;

/// A failed API call.
///
/// `status` is the HTTP status of the response. Transport failures and undecodable
/// bodies, where no status applies, use 500.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()).unwrap_or(500),
            message: format!("Failed to send request: {}", err),
        }
    }
}
