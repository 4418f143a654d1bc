use super::*;
use crate::server::data::user::UserRepository;

mod find_by_username;
mod get_paginated;
mod update_credentials;
