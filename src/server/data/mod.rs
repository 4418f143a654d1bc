//! Data access layer.
//!
//! Each repository borrows the database connection, runs SeaORM queries and returns
//! `DbErr` on failure. Repositories convert entities into domain models from
//! `server::model` at their boundary; authorization and validation live above them.

pub mod app;
pub mod chat;
pub mod forum;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;

#[cfg(test)]
mod test;
