//! Built-in scope catalogue.
//!
//! Every scope is a `{app_name}:{value}` string. The catalogue is seeded as protected
//! scopes at startup; controllers refer to these constants rather than string literals.

// users
pub const USERS_CREATE: &str = "users:create";
pub const USERS_ALL: &str = "users:all";
pub const USERS_RETRIEVE: &str = "users:retrieve";
pub const USERS_UPDATE: &str = "users:update";
pub const USERS_DELETE: &str = "users:delete";

// roles
pub const ROLES_CREATE: &str = "roles:create";
pub const ROLES_ALL: &str = "roles:all";
pub const ROLES_RETRIEVE: &str = "roles:retrieve";
pub const ROLES_UPDATE: &str = "roles:update";
pub const ROLES_DELETE: &str = "roles:delete";

// scopes
pub const SCOPES_CREATE: &str = "scopes:create";
pub const SCOPES_ALL: &str = "scopes:all";
pub const SCOPES_RETRIEVE: &str = "scopes:retrieve";
pub const SCOPES_UPDATE: &str = "scopes:update";
pub const SCOPES_DELETE: &str = "scopes:delete";

// apps
pub const APPS_CREATE: &str = "apps:create";
pub const APPS_ALL: &str = "apps:all";
pub const APPS_RETRIEVE: &str = "apps:retrieve";
pub const APPS_UPDATE: &str = "apps:update";
pub const APPS_DELETE: &str = "apps:delete";

// categories
pub const CATEGORIES_CREATE: &str = "categories:create";
pub const CATEGORIES_ALL: &str = "categories:all";
pub const CATEGORIES_RETRIEVE: &str = "categories:retrieve";
pub const CATEGORIES_UPDATE: &str = "categories:update";
pub const CATEGORIES_DELETE: &str = "categories:delete";

// threads
pub const THREADS_CREATE: &str = "threads:create";
pub const THREADS_ALL: &str = "threads:all";
pub const THREADS_RETRIEVE: &str = "threads:retrieve";
pub const THREADS_UPDATE: &str = "threads:update";
pub const THREADS_DELETE: &str = "threads:delete";

// posts
pub const POSTS_CREATE: &str = "posts:create";
pub const POSTS_ALL: &str = "posts:all";
pub const POSTS_RETRIEVE: &str = "posts:retrieve";
pub const POSTS_UPDATE: &str = "posts:update";
pub const POSTS_DELETE: &str = "posts:delete";

// chat
pub const CHAT_CREATE: &str = "chat:create";
pub const CHAT_ALL: &str = "chat:all";
pub const CHAT_RETRIEVE: &str = "chat:retrieve";
pub const CHAT_UPDATE: &str = "chat:update";
pub const CHAT_DELETE: &str = "chat:delete";

// steam
pub const STEAM_CREATE: &str = "steam:create";
pub const STEAM_ALL: &str = "steam:all";
pub const STEAM_RETRIEVE: &str = "steam:retrieve";
pub const STEAM_UPDATE: &str = "steam:update";
pub const STEAM_DELETE: &str = "steam:delete";

// servers
pub const SERVERS_CREATE: &str = "servers:create";
pub const SERVERS_ALL: &str = "servers:all";
pub const SERVERS_RETRIEVE: &str = "servers:retrieve";
pub const SERVERS_UPDATE: &str = "servers:update";
pub const SERVERS_DELETE: &str = "servers:delete";

// sourcemod_groups
pub const SOURCEMOD_GROUPS_CREATE: &str = "sourcemod_groups:create";
pub const SOURCEMOD_GROUPS_ALL: &str = "sourcemod_groups:all";
pub const SOURCEMOD_GROUPS_RETRIEVE: &str = "sourcemod_groups:retrieve";
pub const SOURCEMOD_GROUPS_UPDATE: &str = "sourcemod_groups:update";
pub const SOURCEMOD_GROUPS_DELETE: &str = "sourcemod_groups:delete";

// sourcemod_admins
pub const SOURCEMOD_ADMINS_CREATE: &str = "sourcemod_admins:create";
pub const SOURCEMOD_ADMINS_ALL: &str = "sourcemod_admins:all";
pub const SOURCEMOD_ADMINS_RETRIEVE: &str = "sourcemod_admins:retrieve";
pub const SOURCEMOD_ADMINS_UPDATE: &str = "sourcemod_admins:update";
pub const SOURCEMOD_ADMINS_DELETE: &str = "sourcemod_admins:delete";

pub const USERS_ME: &str = "users:me";
pub const USERS_ME_UPDATE: &str = "users:me_update";
pub const THREADS_CLOSE: &str = "threads:close";

/// App names that receive the standard `create/all/retrieve/update/delete` values.
pub const DEFAULT_APPS: &[(&str, &str)] = &[
    ("users", "users"),
    ("roles", "roles"),
    ("scopes", "scopes"),
    ("apps", "client applications"),
    ("categories", "forum categories"),
    ("threads", "forum threads"),
    ("posts", "forum posts"),
    ("chat", "chat messages"),
    ("steam", "linked Steam profiles"),
    ("servers", "SourceMod servers"),
    ("sourcemod_groups", "SourceMod admin groups"),
    ("sourcemod_admins", "SourceMod admins"),
];

/// Standard values with the description template used when seeding.
pub const DEFAULT_VALUES: &[(&str, &str)] = &[
    ("create", "Create"),
    ("all", "List all"),
    ("retrieve", "View"),
    ("update", "Update"),
    ("delete", "Delete"),
];

/// Scopes outside the standard grid.
pub const EXTRA_SCOPES: &[(&str, &str, &str)] = &[
    ("users", "me", "View own account"),
    ("users", "me_update", "Update own account"),
    ("threads", "close", "Close and reopen forum threads"),
];

/// Scopes granted to the default `User` role when it is first created.
pub const MEMBER_SCOPES: &[&str] = &[
    USERS_ME,
    USERS_ME_UPDATE,
    CATEGORIES_ALL,
    CATEGORIES_RETRIEVE,
    THREADS_ALL,
    THREADS_RETRIEVE,
    THREADS_CREATE,
    POSTS_ALL,
    POSTS_RETRIEVE,
    POSTS_CREATE,
    CHAT_ALL,
    CHAT_CREATE,
    STEAM_CREATE,
    STEAM_RETRIEVE,
    STEAM_UPDATE,
    STEAM_DELETE,
];

/// A seeded scope: app name, value and description.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultScope {
    pub app_name: &'static str,
    pub value: &'static str,
    pub description: String,
}

/// Expands the catalogue into every scope seeded at startup.
pub fn default_scopes() -> Vec<DefaultScope> {
    let mut scopes = Vec::new();

    for (app_name, subject) in DEFAULT_APPS {
        for (value, verb) in DEFAULT_VALUES {
            scopes.push(DefaultScope {
                app_name,
                value,
                description: format!("{} {}", verb, subject),
            });
        }
    }

    for (app_name, value, description) in EXTRA_SCOPES {
        scopes.push(DefaultScope {
            app_name,
            value,
            description: description.to_string(),
        });
    }

    scopes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_no_duplicates() {
        let scopes = default_scopes();
        let names: HashSet<String> = scopes
            .iter()
            .map(|s| format!("{}:{}", s.app_name, s.value))
            .collect();

        assert_eq!(names.len(), scopes.len());
        assert_eq!(scopes.len(), DEFAULT_APPS.len() * DEFAULT_VALUES.len() + EXTRA_SCOPES.len());
    }

    #[test]
    fn member_scopes_are_part_of_catalogue() {
        let names: HashSet<String> = default_scopes()
            .iter()
            .map(|s| format!("{}:{}", s.app_name, s.value))
            .collect();

        for scope in MEMBER_SCOPES {
            assert!(names.contains(*scope), "{} missing from catalogue", scope);
        }
    }

    #[test]
    fn constants_match_catalogue_format() {
        assert_eq!(THREADS_CREATE, "threads:create");
        assert_eq!(SOURCEMOD_ADMINS_ALL, "sourcemod_admins:all");
        assert_eq!(USERS_ME_UPDATE, "users:me_update");
    }
}
