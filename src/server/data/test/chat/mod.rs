use super::*;
use crate::server::data::chat::ChatRepository;

mod get_paginated;
