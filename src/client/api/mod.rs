//! Endpoint methods on `ApiClient`, one file per API area.

pub mod app;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;
