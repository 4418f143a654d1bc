//! Factory methods for creating test data.
//!
//! Each entity has a `*Factory` builder for customization and a `create_*` shorthand for
//! the common case. Factories insert directly through SeaORM active models so tests of a
//! repository never depend on the repository they are testing.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(db)
//!     .username("shark")
//!     .active(false)
//!     .build()
//!     .await?;
//!
//! // A user whose roles resolve to exactly these scopes
//! let user = factory::helpers::create_user_with_scopes(db, &["threads:create"]).await?;
//! ```

pub mod app;
pub mod forum;
pub mod helpers;
pub mod role;
pub mod scope;
pub mod sourcemod;
pub mod user;

pub use forum::{create_category, create_post, create_thread};
pub use helpers::create_user_with_scopes;
pub use role::{assign_role, create_role};
pub use scope::create_scope;
pub use user::create_user;
