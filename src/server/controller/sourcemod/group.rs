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
        sourcemod::{GroupDto, GroupPayloadDto},
    },
    server::{
        controller::sourcemod::SOURCEMOD_TAG,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageParams, PaginationQuery},
            sourcemod::{Group, GroupParams},
        },
        scopes,
        service::sourcemod::group::GroupService,
        state::AppState,
    },
};

/// Create an admin group.
///
/// # Access Control
/// - `sourcemod_groups:create`
#[utoipa::path(
    post,
    path = "/api/sourcemod/groups",
    tag = SOURCEMOD_TAG,
    request_body = GroupPayloadDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 400, description = "Invalid name, flags or immunity", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "Group name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_group(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<GroupPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_GROUPS_CREATE)])
        .await?;

    let params = GroupParams::from_dto(payload)?;
    let group = GroupService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(group.into_dto())))
}

/// List admin groups.
///
/// # Access Control
/// - `sourcemod_groups:all`
#[utoipa::path(
    get,
    path = "/api/sourcemod/groups",
    tag = SOURCEMOD_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of groups", body = PaginatedDto<GroupDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_groups(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_GROUPS_ALL)])
        .await?;

    let groups = GroupService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(groups.into_dto(Group::into_dto))))
}

/// Get an admin group.
///
/// # Access Control
/// - `sourcemod_groups:retrieve`
#[utoipa::path(
    get,
    path = "/api/sourcemod/groups/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group", body = GroupDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_group(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_GROUPS_RETRIEVE)])
        .await?;

    let group = GroupService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| group_not_found(id))?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Update an admin group.
///
/// # Access Control
/// - `sourcemod_groups:update`
#[utoipa::path(
    put,
    path = "/api/sourcemod/groups/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Group id")),
    request_body = GroupPayloadDto,
    responses(
        (status = 200, description = "Updated group", body = GroupDto),
        (status = 400, description = "Invalid name, flags or immunity", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 409, description = "Group name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_group(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<GroupPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_GROUPS_UPDATE)])
        .await?;

    let params = GroupParams::from_dto(payload)?;

    let group = GroupService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(|| group_not_found(id))?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

/// Delete an admin group. Members keep their own flags.
///
/// # Access Control
/// - `sourcemod_groups:delete`
#[utoipa::path(
    delete,
    path = "/api/sourcemod/groups/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_group(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_GROUPS_DELETE)])
        .await?;

    if !GroupService::new(&state.db).delete(id).await? {
        return Err(group_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn group_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Group {} not found", id))
}
