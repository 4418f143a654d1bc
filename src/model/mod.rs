//! Data transfer objects shared by the API server and the HTTP client.
//!
//! Every request and response body on the wire is one of these types. The server converts
//! its domain models into them at the controller boundary; the client deserializes them
//! directly.

pub mod api;
pub mod app;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;
