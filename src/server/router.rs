//! Route table and OpenAPI document.
//!
//! Every handler is registered through `utoipa_axum::routes!` so the served document at
//! `/api-docs/openapi.json` always matches the routes. Swagger UI is mounted at `/docs`.

use std::sync::Arc;

use axum::Router;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        app, auth, chat, forum, role, scope,
        sourcemod::{admin, group, server},
        steam, user,
    },
    error::{config::ConfigError, AppError},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SharkServers API",
        description = "Community accounts, forum, chat, Steam linking and SourceMod admin management"
    ),
    tags(
        (name = "auth", description = "Registration, login and the current session"),
        (name = "user", description = "User accounts"),
        (name = "role", description = "Roles grouping scopes"),
        (name = "scope", description = "Permission scopes"),
        (name = "app", description = "Client applications"),
        (name = "forum", description = "Forum categories, threads and posts"),
        (name = "chat", description = "Site chat"),
        (name = "steam", description = "Linked Steam accounts"),
        (name = "sourcemod", description = "SourceMod servers, groups and admins")
    )
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// Login and registration sit behind a per-IP rate limiter, which needs the server to be
/// started with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Returns
/// - `Ok(Router)` - Router awaiting its `AppState`
/// - `Err(ConfigError::InvalidRateLimit)` - Rate limit settings are zero
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    let governor_config = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_per_second)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or(ConfigError::InvalidRateLimit {
            per_second: config.rate_limit_per_second,
            burst: config.rate_limit_burst,
        })?;

    let rate_limited = OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .layer(GovernorLayer::new(Arc::new(governor_config)));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(rate_limited)
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        // users
        .routes(routes!(user::update_me))
        .routes(routes!(user::get_users))
        .routes(routes!(user::get_user, user::update_user, user::delete_user))
        .routes(routes!(user::set_user_roles))
        // roles
        .routes(routes!(role::get_roles, role::create_role))
        .routes(routes!(role::get_role, role::update_role, role::delete_role))
        .routes(routes!(role::set_role_scopes))
        // scopes
        .routes(routes!(scope::get_scopes, scope::create_scope))
        .routes(routes!(
            scope::get_scope,
            scope::update_scope,
            scope::delete_scope
        ))
        // apps
        .routes(routes!(app::get_apps, app::create_app))
        .routes(routes!(app::get_app, app::update_app, app::delete_app))
        .routes(routes!(app::set_app_scopes))
        // forum
        .routes(routes!(forum::get_categories, forum::create_category))
        .routes(routes!(
            forum::get_category,
            forum::update_category,
            forum::delete_category
        ))
        .routes(routes!(forum::get_threads, forum::create_thread))
        .routes(routes!(
            forum::get_thread,
            forum::update_thread,
            forum::delete_thread
        ))
        .routes(routes!(forum::set_thread_closed))
        .routes(routes!(forum::get_posts, forum::create_post))
        .routes(routes!(
            forum::get_post,
            forum::update_post,
            forum::delete_post
        ))
        // chat
        .routes(routes!(chat::get_messages, chat::send_message))
        .routes(routes!(chat::chat_socket))
        // steam
        .routes(routes!(
            steam::get_my_steam,
            steam::link_steam,
            steam::unlink_steam
        ))
        .routes(routes!(steam::refresh_steam))
        // sourcemod
        .routes(routes!(server::get_servers, server::create_server))
        .routes(routes!(
            server::get_server,
            server::update_server,
            server::delete_server
        ))
        .routes(routes!(server::get_server_admins))
        .routes(routes!(server::get_admins_simple_ini))
        .routes(routes!(group::get_groups, group::create_group))
        .routes(routes!(
            group::get_group,
            group::update_group,
            group::delete_group
        ))
        .routes(routes!(admin::get_admins, admin::create_admin))
        .routes(routes!(
            admin::get_admin,
            admin::update_admin,
            admin::delete_admin
        ))
        .split_for_parts();

    Ok(router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive()))
}
