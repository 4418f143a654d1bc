//! SharkServers community API.
//!
//! - `model` - Request and response DTOs shared by the server and the client
//! - `server` - The Axum API server
//! - `client` - Typed async HTTP client for the API

pub mod client;
pub mod model;
pub mod server;
