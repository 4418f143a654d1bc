use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        auth::{CurrentUserDto, LoginDto, RegisterDto},
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::RegisterParams,
        scopes,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// New accounts receive the default `User` role. Supplying the one-time admin code printed
/// at startup additionally grants `Admin`.
///
/// # Access Control
/// - Public, rate limited
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Invalid fields or admin code
/// - `409 Conflict` - Username or email already registered
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Username or email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    let user = AuthService::new(
        &state.db,
        &state.admin_code_service,
        state.password_hash_cost,
    )
    .register(params)
    .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Log in with username (or email) and password.
///
/// Stores the user in a new session; the response sets the session cookie.
///
/// # Access Control
/// - Public, rate limited
///
/// # Returns
/// - `200 OK` - Logged in
/// - `401 Unauthorized` - Wrong credentials
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(
        &state.db,
        &state.admin_code_service,
        state.password_hash_cost,
    )
    .login(&session, &payload.username, payload.password)
    .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Log out and delete the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(
        &state.db,
        &state.admin_code_service,
        state.password_hash_cost,
    )
    .logout(&session)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged-in user with email and resolved scopes.
///
/// # Access Control
/// - `users:me`
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = CurrentUserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope or account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::USERS_ME)])
        .await?;

    let user = AuthService::new(
        &state.db,
        &state.admin_code_service,
        state.password_hash_cost,
    )
    .me(current.id())
    .await?;

    Ok((
        StatusCode::OK,
        Json(CurrentUserDto {
            email: user.email.clone(),
            user: user.into_dto(),
            scopes: current.scopes.into_vec(),
        }),
    ))
}
