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
        role::{CreateRoleDto, RoleDto, UpdateRoleDto},
        scope::SetScopesDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageParams, PaginationQuery},
            role::{CreateRoleParams, Role, UpdateRoleParams},
        },
        scopes,
        service::role::RoleService,
        state::AppState,
    },
};

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

/// Create a role.
///
/// # Access Control
/// - `roles:create`
///
/// # Returns
/// - `201 Created` - Role with its scopes
/// - `400 Bad Request` - Invalid name, color or scope id
/// - `409 Conflict` - Name already taken
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = ROLE_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 400, description = "Invalid role data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "Role name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_CREATE)])
        .await?;

    let params = CreateRoleParams::from_dto(payload)?;
    let role = RoleService::new(&state.db)
        .create(params, &current.scopes)
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

/// List roles.
///
/// # Access Control
/// - `roles:all`
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = ROLE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of roles", body = PaginatedDto<RoleDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_ALL)])
        .await?;

    let roles = RoleService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(roles.into_dto(Role::into_dto))))
}

/// Get a role with its scopes.
///
/// # Access Control
/// - `roles:retrieve`
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role", body = RoleDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_RETRIEVE)])
        .await?;

    let role = RoleService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| role_not_found(id))?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Rename or recolor a role.
///
/// Protected roles keep their name; only the color may change.
///
/// # Access Control
/// - `roles:update`
#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated role", body = RoleDto),
        (status = 400, description = "Invalid role data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope or protected role renamed", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 409, description = "Role name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_UPDATE)])
        .await?;

    let params = UpdateRoleParams::from_dto(payload)?;

    let role = RoleService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(|| role_not_found(id))?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Replace the scopes a role grants.
///
/// # Access Control
/// - `roles:update`
#[utoipa::path(
    put,
    path = "/api/roles/{id}/scopes",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role id")),
    request_body = SetScopesDto,
    responses(
        (status = 200, description = "Role with its new scopes", body = RoleDto),
        (status = 400, description = "Unknown scope id", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_role_scopes(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetScopesDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_UPDATE)])
        .await?;

    let role = RoleService::new(&state.db)
        .set_scopes(id, &payload.scope_ids, &current.scopes)
        .await?
        .ok_or_else(|| role_not_found(id))?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Delete a role. Protected roles cannot be deleted.
///
/// # Access Control
/// - `roles:delete`
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope or role is protected", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::ROLES_DELETE)])
        .await?;

    if !RoleService::new(&state.db).delete(id).await? {
        return Err(role_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn role_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Role {} not found", id))
}
