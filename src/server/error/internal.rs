use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A default role expected from startup seeding is missing.
    ///
    /// Registration cannot assign the member role without it.
    #[error("Default role '{0}' has not been seeded")]
    MissingDefaultRole(String),

    /// A row written moments ago could not be read back.
    #[error("Record {id} missing from table '{table}' after write")]
    RecordMissingAfterWrite { table: &'static str, id: i32 },

    /// A stored Steam id no longer parses.
    #[error("Stored Steam id '{value}' is invalid")]
    InvalidStoredSteamId { value: String },

    /// A stored port is outside the `u16` range.
    #[error("Stored port {port} for server {server_id} is out of range")]
    InvalidStoredPort { server_id: i32, port: i32 },

    /// A blocking task such as password hashing panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    BlockingTask(String),
}
