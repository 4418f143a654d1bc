use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        sourcemod::{AdminDto, ServerDto, ServerPayloadDto},
    },
    server::{
        controller::sourcemod::SOURCEMOD_TAG,
        error::AppError,
        middleware::auth::{AuthGuard, Permission, PrincipalGuard},
        model::{
            pagination::{PageParams, PaginationQuery},
            sourcemod::{Admin, Server, ServerParams},
        },
        scopes,
        service::sourcemod::server::ServerService,
        state::AppState,
    },
};

/// Register a game server.
///
/// # Access Control
/// - `servers:create`
#[utoipa::path(
    post,
    path = "/api/sourcemod/servers",
    tag = SOURCEMOD_TAG,
    request_body = ServerPayloadDto,
    responses(
        (status = 201, description = "Server created", body = ServerDto),
        (status = 400, description = "Invalid name, ip or port", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_server(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ServerPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SERVERS_CREATE)])
        .await?;

    let params = ServerParams::from_dto(payload)?;
    let server = ServerService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(server.into_dto())))
}

/// List game servers.
///
/// # Access Control
/// - `servers:all`
#[utoipa::path(
    get,
    path = "/api/sourcemod/servers",
    tag = SOURCEMOD_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of servers", body = PaginatedDto<ServerDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_servers(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SERVERS_ALL)])
        .await?;

    let servers = ServerService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(servers.into_dto(Server::into_dto))))
}

/// Get a game server.
///
/// # Access Control
/// - `servers:retrieve`
#[utoipa::path(
    get,
    path = "/api/sourcemod/servers/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Server id")),
    responses(
        (status = 200, description = "Server", body = ServerDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_server(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SERVERS_RETRIEVE)])
        .await?;

    let server = ServerService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| server_not_found(id))?;

    Ok((StatusCode::OK, Json(server.into_dto())))
}

/// Update a game server.
///
/// # Access Control
/// - `servers:update`
#[utoipa::path(
    put,
    path = "/api/sourcemod/servers/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Server id")),
    request_body = ServerPayloadDto,
    responses(
        (status = 200, description = "Updated server", body = ServerDto),
        (status = 400, description = "Invalid name, ip or port", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_server(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ServerPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SERVERS_UPDATE)])
        .await?;

    let params = ServerParams::from_dto(payload)?;

    let server = ServerService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(|| server_not_found(id))?;

    Ok((StatusCode::OK, Json(server.into_dto())))
}

/// Delete a game server and the admins scoped to it.
///
/// # Access Control
/// - `servers:delete`
#[utoipa::path(
    delete,
    path = "/api/sourcemod/servers/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Server id")),
    responses(
        (status = 204, description = "Server deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_server(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SERVERS_DELETE)])
        .await?;

    if !ServerService::new(&state.db).delete(id).await? {
        return Err(server_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Admins effective on a server: its own admins plus global ones.
///
/// # Access Control
/// - `sourcemod_admins:all`, as a session user or an app (`X-Client-Id`, `X-Client-Secret`)
#[utoipa::path(
    get,
    path = "/api/sourcemod/servers/{id}/admins",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Server id")),
    responses(
        (status = 200, description = "Admins of the server", body = Vec<AdminDto>),
        (status = 401, description = "Not authenticated or bad client credentials", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_server_admins(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = PrincipalGuard::new(&state.db, &session, &headers)
        .require(&[scopes::SOURCEMOD_ADMINS_ALL])
        .await?;

    let (_, admins) = ServerService::new(&state.db)
        .get_admins(id)
        .await?
        .ok_or_else(|| server_not_found(id))?;

    let admins: Vec<AdminDto> = admins.into_iter().map(Admin::into_dto).collect();

    Ok((StatusCode::OK, Json(admins)))
}

/// The server's admins as a SourceMod `admins_simple.ini` file.
///
/// # Access Control
/// - `sourcemod_admins:all`, as a session user or an app (`X-Client-Id`, `X-Client-Secret`)
#[utoipa::path(
    get,
    path = "/api/sourcemod/servers/{id}/admins_simple.ini",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Server id")),
    responses(
        (status = 200, description = "admins_simple.ini contents", body = String, content_type = "text/plain"),
        (status = 401, description = "Not authenticated or bad client credentials", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Server not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admins_simple_ini(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = PrincipalGuard::new(&state.db, &session, &headers)
        .require(&[scopes::SOURCEMOD_ADMINS_ALL])
        .await?;

    let ini = ServerService::new(&state.db)
        .render_admins_simple(id)
        .await?
        .ok_or_else(|| server_not_found(id))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        ini,
    ))
}

fn server_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Server {} not found", id))
}
