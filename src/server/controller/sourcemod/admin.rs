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
        sourcemod::{AdminDto, AdminPayloadDto},
    },
    server::{
        controller::sourcemod::SOURCEMOD_TAG,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageParams, PaginationQuery},
            sourcemod::{Admin, AdminParams},
        },
        scopes,
        service::sourcemod::admin::AdminService,
        state::AppState,
    },
};

/// Create a SourceMod admin.
///
/// The identity may be any Steam id format and is stored as steam2. Without a
/// `server_id` the admin applies to every server.
///
/// # Access Control
/// - `sourcemod_admins:create`
#[utoipa::path(
    post,
    path = "/api/sourcemod/admins",
    tag = SOURCEMOD_TAG,
    request_body = AdminPayloadDto,
    responses(
        (status = 201, description = "Admin created", body = AdminDto),
        (status = 400, description = "Invalid fields or unknown group, server or user", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_admin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AdminPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_ADMINS_CREATE)])
        .await?;

    let params = AdminParams::from_dto(payload)?;
    let admin = AdminService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}

/// List SourceMod admins.
///
/// # Access Control
/// - `sourcemod_admins:all`
#[utoipa::path(
    get,
    path = "/api/sourcemod/admins",
    tag = SOURCEMOD_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of admins", body = PaginatedDto<AdminDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admins(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_ADMINS_ALL)])
        .await?;

    let admins = AdminService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(admins.into_dto(Admin::into_dto))))
}

/// Get a SourceMod admin.
///
/// # Access Control
/// - `sourcemod_admins:retrieve`
#[utoipa::path(
    get,
    path = "/api/sourcemod/admins/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin", body = AdminDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_ADMINS_RETRIEVE)])
        .await?;

    let admin = AdminService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| admin_not_found(id))?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Update a SourceMod admin.
///
/// # Access Control
/// - `sourcemod_admins:update`
#[utoipa::path(
    put,
    path = "/api/sourcemod/admins/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Admin id")),
    request_body = AdminPayloadDto,
    responses(
        (status = 200, description = "Updated admin", body = AdminDto),
        (status = 400, description = "Invalid fields or unknown group, server or user", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<AdminPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_ADMINS_UPDATE)])
        .await?;

    let params = AdminParams::from_dto(payload)?;

    let admin = AdminService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(|| admin_not_found(id))?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Delete a SourceMod admin.
///
/// # Access Control
/// - `sourcemod_admins:delete`
#[utoipa::path(
    delete,
    path = "/api/sourcemod/admins/{id}",
    tag = SOURCEMOD_TAG,
    params(("id" = i32, Path, description = "Admin id")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::SOURCEMOD_ADMINS_DELETE)])
        .await?;

    if !AdminService::new(&state.db).delete(id).await? {
        return Err(admin_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn admin_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Admin {} not found", id))
}
