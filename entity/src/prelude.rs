pub use super::app::Entity as App;
pub use super::app_scope::Entity as AppScope;
pub use super::chat_message::Entity as ChatMessage;
pub use super::forum_category::Entity as ForumCategory;
pub use super::forum_post::Entity as ForumPost;
pub use super::forum_thread::Entity as ForumThread;
pub use super::role::Entity as Role;
pub use super::role_scope::Entity as RoleScope;
pub use super::scope::Entity as Scope;
pub use super::sourcemod_admin::Entity as SourcemodAdmin;
pub use super::sourcemod_group::Entity as SourcemodGroup;
pub use super::sourcemod_server::Entity as SourcemodServer;
pub use super::steam_profile::Entity as SteamProfile;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
