//! SeaORM entities for the SharkServers database schema.
//!
//! Join tables (`user_role`, `role_scope`, `app_scope`) use composite primary keys so a
//! pairing can only exist once. Child tables cascade on delete of their parent.

pub mod prelude;

pub mod app;
pub mod app_scope;
pub mod chat_message;
pub mod forum_category;
pub mod forum_post;
pub mod forum_thread;
pub mod role;
pub mod role_scope;
pub mod scope;
pub mod sourcemod_admin;
pub mod sourcemod_group;
pub mod sourcemod_server;
pub mod steam_profile;
pub mod user;
pub mod user_role;
