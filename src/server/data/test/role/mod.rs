use super::*;
use crate::server::data::role::RoleRepository;

mod get_for_users;
mod has_members;
mod set_scopes;
