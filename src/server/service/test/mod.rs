use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::pagination::PageParams,
};

mod app;
mod auth;
mod chat;
mod forum;
mod role;
mod sourcemod;
mod steam;
mod user;
