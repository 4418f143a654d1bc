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
        app::{AppDto, CreateAppDto, CreatedAppDto, UpdateAppDto},
        scope::SetScopesDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, CurrentUser, Permission},
        model::{
            app::{App, CreateAppParams, UpdateAppParams},
            pagination::{PageParams, PaginationQuery},
        },
        scopes,
        service::app::AppService,
        state::AppState,
    },
};

/// Tag for grouping client application endpoints in OpenAPI documentation
pub static APP_TAG: &str = "app";

/// Register a client application owned by the current user.
///
/// The plaintext client secret is only ever returned by this endpoint.
///
/// # Access Control
/// - `apps:create`
/// - every requested scope must be held by the current user
///
/// # Returns
/// - `201 Created` - App and its client secret
/// - `400 Bad Request` - Invalid name or unknown scope id
/// - `403 Forbidden` - Requested a scope the user does not hold
/// - `409 Conflict` - App name taken
#[utoipa::path(
    post,
    path = "/api/apps",
    tag = APP_TAG,
    request_body = CreateAppDto,
    responses(
        (status = 201, description = "App created", body = CreatedAppDto),
        (status = 400, description = "Invalid app data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "App name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_app(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAppDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::APPS_CREATE)])
        .await?;

    let params = CreateAppParams::from_dto(current.id(), payload)?;

    let created = AppService::new(&state.db, state.password_hash_cost)
        .create(params, &current.scopes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedAppDto {
            app: created.app.into_dto(),
            client_secret: created.client_secret,
        }),
    ))
}

/// List client applications.
///
/// Holders of `apps:all` see every app; everyone else sees the apps they own.
///
/// # Access Control
/// - Logged in
#[utoipa::path(
    get,
    path = "/api/apps",
    tag = APP_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of apps", body = PaginatedDto<AppDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_apps(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let owner_id = if current.has_scope(scopes::APPS_ALL) {
        None
    } else {
        Some(current.id())
    };

    let apps = AppService::new(&state.db, state.password_hash_cost)
        .get_paginated(owner_id, PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(apps.into_dto(App::into_dto))))
}

/// Get an application.
///
/// # Access Control
/// - Owner, or `apps:retrieve`
#[utoipa::path(
    get,
    path = "/api/apps/{id}",
    tag = APP_TAG,
    params(("id" = i32, Path, description = "App id")),
    responses(
        (status = 200, description = "App", body = AppDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "App not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_app(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let app = owned_app(&state, &current, id, scopes::APPS_RETRIEVE).await?;

    Ok((StatusCode::OK, Json(app.into_dto())))
}

/// Rename an application or change its description.
///
/// # Access Control
/// - Owner, or `apps:update`
#[utoipa::path(
    put,
    path = "/api/apps/{id}",
    tag = APP_TAG,
    params(("id" = i32, Path, description = "App id")),
    request_body = UpdateAppDto,
    responses(
        (status = 200, description = "Updated app", body = AppDto),
        (status = 400, description = "Invalid app data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "App not found", body = ErrorDto),
        (status = 409, description = "App name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_app(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAppDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    owned_app(&state, &current, id, scopes::APPS_UPDATE).await?;
    let params = UpdateAppParams::from_dto(payload)?;

    let app = AppService::new(&state.db, state.password_hash_cost)
        .update(id, params)
        .await?
        .ok_or_else(|| app_not_found(id))?;

    Ok((StatusCode::OK, Json(app.into_dto())))
}

/// Replace the scopes an application may act with.
///
/// # Access Control
/// - Owner, or `apps:update`
/// - every scope must be held by the current user
#[utoipa::path(
    put,
    path = "/api/apps/{id}/scopes",
    tag = APP_TAG,
    params(("id" = i32, Path, description = "App id")),
    request_body = SetScopesDto,
    responses(
        (status = 200, description = "App with its new scopes", body = AppDto),
        (status = 400, description = "Unknown scope id", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "App not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_app_scopes(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetScopesDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    owned_app(&state, &current, id, scopes::APPS_UPDATE).await?;

    let app = AppService::new(&state.db, state.password_hash_cost)
        .set_scopes(id, &payload.scope_ids, &current.scopes)
        .await?
        .ok_or_else(|| app_not_found(id))?;

    Ok((StatusCode::OK, Json(app.into_dto())))
}

/// Delete an application. Its credentials stop working immediately.
///
/// # Access Control
/// - Owner, or `apps:delete`
#[utoipa::path(
    delete,
    path = "/api/apps/{id}",
    tag = APP_TAG,
    params(("id" = i32, Path, description = "App id")),
    responses(
        (status = 204, description = "App deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "App not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_app(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    owned_app(&state, &current, id, scopes::APPS_DELETE).await?;

    if !AppService::new(&state.db, state.password_hash_cost)
        .delete(id)
        .await?
    {
        return Err(app_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Loads the app and checks the user owns it or holds `scope`.
async fn owned_app(
    state: &AppState,
    current: &CurrentUser,
    id: i32,
    scope: &'static str,
) -> Result<App, AppError> {
    let app = AppService::new(&state.db, state.password_hash_cost)
        .get_by_id(id)
        .await?
        .ok_or_else(|| app_not_found(id))?;

    current.authorize(&[Permission::OwnerOr {
        owner_id: app.owner_id,
        scope,
    }])?;

    Ok(app)
}

fn app_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("App {} not found", id))
}
