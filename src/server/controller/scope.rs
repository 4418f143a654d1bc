use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        scope::{CreateScopeDto, ScopeDto, UpdateScopeDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageParams, PaginationQuery},
            scope::{CreateScopeParams, Scope},
        },
        scopes,
        service::scope::ScopeService,
        state::AppState,
    },
};

/// Tag for grouping scope endpoints in OpenAPI documentation
pub static SCOPE_TAG: &str = "scope";

/// Create a custom scope.
///
/// Scopes created through the API are never protected.
///
/// # Access Control
/// - `scopes:create`
#[utoipa::path(
    post,
    path = "/api/scopes",
    tag = SCOPE_TAG,
    request_body = CreateScopeDto,
    responses(
        (status = 201, description = "Scope created", body = ScopeDto),
        (status = 400, description = "Invalid app name or value", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "Scope already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_scope(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateScopeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SCOPES_CREATE)])
        .await?;

    let params = CreateScopeParams::from_dto(payload)?;
    let scope = ScopeService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(scope.into_dto())))
}

/// List scopes.
///
/// # Access Control
/// - `scopes:all`
#[utoipa::path(
    get,
    path = "/api/scopes",
    tag = SCOPE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of scopes", body = PaginatedDto<ScopeDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_scopes(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SCOPES_ALL)])
        .await?;

    let scopes = ScopeService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(scopes.into_dto(Scope::into_dto))))
}

/// Get a scope by id.
///
/// # Access Control
/// - `scopes:retrieve`
#[utoipa::path(
    get,
    path = "/api/scopes/{id}",
    tag = SCOPE_TAG,
    params(("id" = i32, Path, description = "Scope id")),
    responses(
        (status = 200, description = "Scope", body = ScopeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Scope not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_scope(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SCOPES_RETRIEVE)])
        .await?;

    let scope = ScopeService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| scope_not_found(id))?;

    Ok((StatusCode::OK, Json(scope.into_dto())))
}

/// Update a scope's description. The name of a scope never changes.
///
/// # Access Control
/// - `scopes:update`
#[utoipa::path(
    put,
    path = "/api/scopes/{id}",
    tag = SCOPE_TAG,
    params(("id" = i32, Path, description = "Scope id")),
    request_body = UpdateScopeDto,
    responses(
        (status = 200, description = "Updated scope", body = ScopeDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Scope not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_scope(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateScopeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SCOPES_UPDATE)])
        .await?;

    let scope = ScopeService::new(&state.db)
        .update_description(id, payload.description)
        .await?
        .ok_or_else(|| scope_not_found(id))?;

    Ok((StatusCode::OK, Json(scope.into_dto())))
}

/// Delete a custom scope, revoking it from every role and app.
///
/// # Access Control
/// - `scopes:delete`
#[utoipa::path(
    delete,
    path = "/api/scopes/{id}",
    tag = SCOPE_TAG,
    params(("id" = i32, Path, description = "Scope id")),
    responses(
        (status = 204, description = "Scope deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope or scope is protected", body = ErrorDto),
        (status = 404, description = "Scope not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_scope(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SCOPES_DELETE)])
        .await?;

    if !ScopeService::new(&state.db).delete(id).await? {
        return Err(scope_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn scope_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Scope {} not found", id))
}
