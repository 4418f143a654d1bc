//! HTTP request handlers.
//!
//! Controllers authorize the request, convert DTOs into validated params, call a service
//! and convert the resulting domain model back into a DTO.

pub mod app;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;
