//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce uniqueness and
//! protection rules, validate references between records, hash secrets and return domain
//! models. Every service borrows the database connection, so constructing one per request
//! is free.

pub mod admin;
pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod chat;
pub mod forum;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod steam;
pub mod user;

#[cfg(test)]
mod test;
