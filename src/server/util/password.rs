//! bcrypt hashing off the async runtime.
//!
//! bcrypt is deliberately slow, so both operations run on tokio's blocking pool.

use crate::server::error::{internal::InternalError, AppError};

pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))??;

    Ok(hash)
}

/// # Returns
/// - `Ok(true)` - Password matches the hash
/// - `Ok(false)` - Password does not match
/// - `Err(AppError::BcryptErr(_))` - Stored hash is malformed
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))??;

    Ok(valid)
}
