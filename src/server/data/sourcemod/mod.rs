pub mod admin;
pub mod group;
pub mod server;
