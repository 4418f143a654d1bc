//! SourceMod administration: game servers, admin groups and per-server admins.

pub mod admin;
pub mod group;
pub mod server;
