use crate::server::error::{internal::InternalError, AppError};

/// Parses a stored 64-bit Steam id back into its canonical form.
///
/// # Arguments
/// - `value` - The `steamid64` column value
///
/// # Returns
/// - `Ok(SteamId)` - The stored id is still a valid individual account id
/// - `Err(AppError::InternalErr(InvalidStoredSteamId))` - The row holds a value that never
///   came from `SteamId`
pub fn parse_stored_steam_id(value: i64) -> Result<super::steam_id::SteamId, AppError> {
    let steam_id = u64::try_from(value)
        .ok()
        .and_then(super::steam_id::SteamId::from_id64)
        .ok_or_else(|| InternalError::InvalidStoredSteamId {
            value: value.to_string(),
        })?;

    Ok(steam_id)
}

/// Converts a stored `i32` port back into `u16`.
pub fn parse_stored_port(server_id: i32, port: i32) -> Result<u16, AppError> {
    let port =
        u16::try_from(port).map_err(|_| InternalError::InvalidStoredPort { server_id, port })?;

    Ok(port)
}
