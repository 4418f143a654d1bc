use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        steam::{LinkSteamDto, SteamProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        scopes,
        service::steam::SteamService,
        state::AppState,
    },
};

/// Tag for grouping Steam endpoints in OpenAPI documentation
pub static STEAM_TAG: &str = "steam";

/// Link a Steam account to the current user.
///
/// Accepts a 64-bit id, `STEAM_X:Y:Z`, `[U:1:N]` or a profile URL. Relinking replaces
/// the user's previous account.
///
/// # Access Control
/// - `steam:create`
///
/// # Returns
/// - `200 OK` - Linked profile
/// - `400 Bad Request` - Unparsable id or Steam integration disabled
/// - `404 Not Found` - Steam has no such account
/// - `409 Conflict` - Account linked to another user
#[utoipa::path(
    post,
    path = "/api/steam/me",
    tag = STEAM_TAG,
    request_body = LinkSteamDto,
    responses(
        (status = 200, description = "Linked profile", body = SteamProfileDto),
        (status = 400, description = "Invalid Steam id or integration disabled", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Steam account not found", body = ErrorDto),
        (status = 409, description = "Steam account linked to another user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn link_steam(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LinkSteamDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::STEAM_CREATE)])
        .await?;

    let profile = steam_service(&state)
        .link(current.id(), &payload.steam_id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Get the current user's linked Steam profile.
///
/// # Access Control
/// - `steam:retrieve`
#[utoipa::path(
    get,
    path = "/api/steam/me",
    tag = STEAM_TAG,
    responses(
        (status = 200, description = "Linked profile", body = SteamProfileDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "No linked Steam account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_steam(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::STEAM_RETRIEVE)])
        .await?;

    let profile = steam_service(&state)
        .get_mine(current.id())
        .await?
        .ok_or_else(not_linked)?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Re-fetch name, avatar and country from Steam.
///
/// # Access Control
/// - `steam:update`
#[utoipa::path(
    post,
    path = "/api/steam/me/refresh",
    tag = STEAM_TAG,
    responses(
        (status = 200, description = "Refreshed profile", body = SteamProfileDto),
        (status = 400, description = "Steam integration disabled", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "No linked Steam account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_steam(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::STEAM_UPDATE)])
        .await?;

    let profile = steam_service(&state)
        .refresh(current.id())
        .await?
        .ok_or_else(not_linked)?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Unlink the current user's Steam account.
///
/// # Access Control
/// - `steam:delete`
#[utoipa::path(
    delete,
    path = "/api/steam/me",
    tag = STEAM_TAG,
    responses(
        (status = 204, description = "Steam account unlinked"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "No linked Steam account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unlink_steam(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::STEAM_DELETE)])
        .await?;

    if !steam_service(&state).unlink(current.id()).await? {
        return Err(not_linked());
    }

    Ok(StatusCode::NO_CONTENT)
}

fn steam_service(state: &AppState) -> SteamService<'_> {
    SteamService::new(
        &state.db,
        &state.http_client,
        state.steam_api_key.as_deref(),
        &state.steam_api_url,
    )
}

fn not_linked() -> AppError {
    AppError::NotFound("No Steam account linked".to_string())
}
