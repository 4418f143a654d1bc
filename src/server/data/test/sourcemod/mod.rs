use super::*;
use crate::server::data::sourcemod::admin::AdminRepository;

mod get_for_server;
