//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler by Axum's state
//! extraction. Every field is cheap to clone: the database handle and `reqwest::Client` are
//! pools, while the admin code service and chat broadcaster share their inner state
//! through `Arc`.

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::{admin::code::AdminCodeService, chat::ChatBroadcaster},
};

#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub db: DatabaseConnection,

    /// Outgoing HTTP client for the Steam Web API. Redirects are disabled.
    pub http_client: reqwest::Client,

    /// Holds the one-time code that promotes the first registered admin.
    pub admin_code_service: AdminCodeService,

    /// Fan-out of new chat messages to WebSocket subscribers.
    pub chat: ChatBroadcaster,

    /// Steam Web API key; `None` disables profile linking.
    pub steam_api_key: Option<String>,

    /// Base URL of the Steam Web API, overridable for tests.
    pub steam_api_url: String,

    /// bcrypt cost for user passwords and app secrets.
    pub password_hash_cost: u32,

    /// Public base URL of the API.
    pub app_url: String,
}

impl AppState {
    /// Creates the state from startup dependencies and the loaded configuration.
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        admin_code_service: AdminCodeService,
        chat: ChatBroadcaster,
        config: &Config,
    ) -> Self {
        Self {
            db,
            http_client,
            admin_code_service,
            chat,
            steam_api_key: config.steam_api_key.clone(),
            steam_api_url: config.steam_api_url.clone(),
            password_hash_cost: config.password_hash_cost,
            app_url: config.app_url.clone(),
        }
    }
}
