use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::model::pagination::PageParams;

mod chat;
mod forum;
mod role;
mod scope;
mod sourcemod;
mod user;
