//! SourceMod admin management.
//!
//! Servers, admin groups and admins are managed by staff through the session. Game
//! servers poll their admin list with app credentials.

pub mod admin;
pub mod group;
pub mod server;

/// Tag for grouping SourceMod endpoints in OpenAPI documentation
pub static SOURCEMOD_TAG: &str = "sourcemod";
