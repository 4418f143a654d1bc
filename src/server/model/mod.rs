//! Domain models used by the service and data layers.
//!
//! Repositories convert SeaORM entities into these types at their boundary; controllers
//! convert them into DTOs from `crate::model` before responding. Parameter types
//! (`*Params`) carry validated input from controllers into services.

pub mod app;
pub mod chat;
pub mod forum;
pub mod pagination;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;
