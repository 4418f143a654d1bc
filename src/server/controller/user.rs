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
        user::{SetUserRolesDto, UpdateMeDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageParams, PaginationQuery},
            user::{UpdateMeParams, User},
        },
        scopes,
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Update the logged-in user's email or password.
///
/// # Access Control
/// - `users:me_update`
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Invalid email or password
/// - `409 Conflict` - Email used by another account
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateMeDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid email or password", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateMeDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_ME_UPDATE)])
        .await?;

    let params = UpdateMeParams::from_dto(payload)?;

    let user = AuthService::new(
        &state.db,
        &state.admin_code_service,
        state.password_hash_cost,
    )
    .update_me(current.id(), params)
    .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// List users.
///
/// # Access Control
/// - `users:all`
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_ALL)])
        .await?;

    let users = UserService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(User::into_dto))))
}

/// Get a user by id.
///
/// # Access Control
/// - `users:retrieve`
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_RETRIEVE)])
        .await?;

    let user = UserService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Activate or deactivate a user.
///
/// # Access Control
/// - `users:update`
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Cannot deactivate yourself", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_UPDATE)])
        .await?;

    if current.id() == id && !payload.is_active {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let user = UserService::new(&state.db)
        .set_active(id, payload.is_active)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Replace a user's roles.
///
/// # Access Control
/// - `users:update`
#[utoipa::path(
    put,
    path = "/api/users/{id}/roles",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = SetUserRolesDto,
    responses(
        (status = 200, description = "User with new roles", body = UserDto),
        (status = 400, description = "Unknown role id", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_roles(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetUserRolesDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_UPDATE)])
        .await?;

    let user = UserService::new(&state.db)
        .set_roles(id, &payload.role_ids, &current.scopes)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete a user and everything they authored.
///
/// # Access Control
/// - `users:delete`
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete yourself", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_DELETE)])
        .await?;

    if current.id() == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    if !UserService::new(&state.db).delete(id).await? {
        return Err(user_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}
