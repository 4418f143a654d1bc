use super::*;
use crate::server::data::scope::ScopeRepository;

mod get_ids_by_names;
mod get_names_for_app;
mod get_names_for_user;
