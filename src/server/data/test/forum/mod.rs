use super::*;
use crate::server::data::forum::{post::PostRepository, thread::ThreadRepository};

mod get_paginated_by_category;
mod get_paginated_by_thread;
