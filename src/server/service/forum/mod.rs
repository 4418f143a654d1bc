//! Forum categories, threads and posts.
//!
//! Authors may edit and delete their own threads and posts; anyone else needs the
//! matching `threads:*` or `posts:*` scope. Those checks run here because the author is
//! only known once the record is loaded.

pub mod category;
pub mod post;
pub mod thread;
