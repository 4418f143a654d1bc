//! Forum categories, threads and posts.
//!
//! Categories are managed by staff. Threads and posts belong to their author, who can
//! always edit or delete them; other users need the matching `update`/`delete` scope.

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
        forum::{
            CategoryDto, CategoryPayloadDto, PostDto, PostPayloadDto, SetThreadClosedDto,
            ThreadDto, ThreadPayloadDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            forum::{validate_content, Category, CategoryParams, Post, Thread, ThreadParams},
            pagination::{PageParams, PaginationQuery},
        },
        scopes,
        service::forum::{category::CategoryService, post::PostService, thread::ThreadService},
        state::AppState,
    },
};

/// Tag for grouping forum endpoints in OpenAPI documentation
pub static FORUM_TAG: &str = "forum";

/// Create a category.
///
/// # Access Control
/// - `categories:create`
#[utoipa::path(
    post,
    path = "/api/forum/categories",
    tag = FORUM_TAG,
    request_body = CategoryPayloadDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category name", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 409, description = "Category name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CategoryPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CATEGORIES_CREATE)])
        .await?;

    let params = CategoryParams::from_dto(payload)?;
    let category = CategoryService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

/// List categories.
///
/// # Access Control
/// - `categories:all`
#[utoipa::path(
    get,
    path = "/api/forum/categories",
    tag = FORUM_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of categories", body = PaginatedDto<CategoryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CATEGORIES_ALL)])
        .await?;

    let categories = CategoryService::new(&state.db)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(categories.into_dto(Category::into_dto))))
}

/// Get a category.
///
/// # Access Control
/// - `categories:retrieve`
#[utoipa::path(
    get,
    path = "/api/forum/categories/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CATEGORIES_RETRIEVE)])
        .await?;

    let category = CategoryService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| category_not_found(id))?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Update a category.
///
/// # Access Control
/// - `categories:update`
#[utoipa::path(
    put,
    path = "/api/forum/categories/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryPayloadDto,
    responses(
        (status = 200, description = "Updated category", body = CategoryDto),
        (status = 400, description = "Invalid category name", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 409, description = "Category name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CATEGORIES_UPDATE)])
        .await?;

    let params = CategoryParams::from_dto(payload)?;

    let category = CategoryService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(|| category_not_found(id))?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Delete a category with all of its threads and posts.
///
/// # Access Control
/// - `categories:delete`
#[utoipa::path(
    delete,
    path = "/api/forum/categories/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CATEGORIES_DELETE)])
        .await?;

    if !CategoryService::new(&state.db).delete(id).await? {
        return Err(category_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List threads of a category, most recently active first.
///
/// # Access Control
/// - `threads:all`
#[utoipa::path(
    get,
    path = "/api/forum/categories/{id}/threads",
    tag = FORUM_TAG,
    params(
        ("id" = i32, Path, description = "Category id"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of threads", body = PaginatedDto<ThreadDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_threads(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::THREADS_ALL)])
        .await?;

    let threads = ThreadService::new(&state.db)
        .get_paginated_by_category(category_id, PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(threads.into_dto(Thread::into_dto))))
}

/// Start a thread in a category.
///
/// # Access Control
/// - `threads:create`
#[utoipa::path(
    post,
    path = "/api/forum/categories/{id}/threads",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = ThreadPayloadDto,
    responses(
        (status = 201, description = "Thread created", body = ThreadDto),
        (status = 400, description = "Invalid title or content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_thread(
    State(state): State<AppState>,
    session: Session,
    Path(category_id): Path<i32>,
    Json(payload): Json<ThreadPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::THREADS_CREATE)])
        .await?;

    let params = ThreadParams::from_dto(payload)?;

    let thread = ThreadService::new(&state.db)
        .create(category_id, current.id(), params)
        .await?;

    Ok((StatusCode::CREATED, Json(thread.into_dto())))
}

/// Get a thread.
///
/// # Access Control
/// - `threads:retrieve`
#[utoipa::path(
    get,
    path = "/api/forum/threads/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Thread", body = ThreadDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_thread(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::THREADS_RETRIEVE)])
        .await?;

    let thread = ThreadService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;

    Ok((StatusCode::OK, Json(thread.into_dto())))
}

/// Edit a thread's title and content.
///
/// # Access Control
/// - Author, or `threads:update`
#[utoipa::path(
    put,
    path = "/api/forum/threads/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Thread id")),
    request_body = ThreadPayloadDto,
    responses(
        (status = 200, description = "Updated thread", body = ThreadDto),
        (status = 400, description = "Invalid title or content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_thread(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ThreadPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = ThreadParams::from_dto(payload)?;

    let thread = ThreadService::new(&state.db)
        .update(&current, id, params)
        .await?
        .ok_or_else(|| thread_not_found(id))?;

    Ok((StatusCode::OK, Json(thread.into_dto())))
}

/// Close or reopen a thread.
///
/// # Access Control
/// - `threads:close`
#[utoipa::path(
    put,
    path = "/api/forum/threads/{id}/closed",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Thread id")),
    request_body = SetThreadClosedDto,
    responses(
        (status = 200, description = "Updated thread", body = ThreadDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_thread_closed(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetThreadClosedDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::THREADS_CLOSE)])
        .await?;

    let thread = ThreadService::new(&state.db)
        .set_closed(id, payload.closed)
        .await?
        .ok_or_else(|| thread_not_found(id))?;

    Ok((StatusCode::OK, Json(thread.into_dto())))
}

/// Delete a thread and its posts.
///
/// # Access Control
/// - Author, or `threads:delete`
#[utoipa::path(
    delete,
    path = "/api/forum/threads/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Thread id")),
    responses(
        (status = 204, description = "Thread deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_thread(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    if !ThreadService::new(&state.db).delete(&current, id).await? {
        return Err(thread_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List posts of a thread, oldest first.
///
/// # Access Control
/// - `posts:all`
#[utoipa::path(
    get,
    path = "/api/forum/threads/{id}/posts",
    tag = FORUM_TAG,
    params(
        ("id" = i32, Path, description = "Thread id"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of posts", body = PaginatedDto<PostDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_posts(
    State(state): State<AppState>,
    session: Session,
    Path(thread_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::POSTS_ALL)])
        .await?;

    let posts = PostService::new(&state.db)
        .get_paginated_by_thread(thread_id, PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(posts.into_dto(Post::into_dto))))
}

/// Reply to a thread.
///
/// # Access Control
/// - `posts:create`
///
/// # Returns
/// - `201 Created` - Post created
/// - `400 Bad Request` - Invalid content or thread closed
/// - `404 Not Found` - Thread does not exist
#[utoipa::path(
    post,
    path = "/api/forum/threads/{id}/posts",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Thread id")),
    request_body = PostPayloadDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid content or thread closed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Thread not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Path(thread_id): Path<i32>,
    Json(payload): Json<PostPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::POSTS_CREATE)])
        .await?;

    let content = validate_content(payload.content)?;

    let post = PostService::new(&state.db)
        .create(thread_id, current.id(), content)
        .await?;

    Ok((StatusCode::CREATED, Json(post.into_dto())))
}

/// Get a post.
///
/// # Access Control
/// - `posts:retrieve`
#[utoipa::path(
    get,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::POSTS_RETRIEVE)])
        .await?;

    let post = PostService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Edit a post.
///
/// # Access Control
/// - Author, or `posts:update`
#[utoipa::path(
    put,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    request_body = PostPayloadDto,
    responses(
        (status = 200, description = "Updated post", body = PostDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<PostPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let content = validate_content(payload.content)?;

    let post = PostService::new(&state.db)
        .update(&current, id, content)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Delete a post.
///
/// # Access Control
/// - Author, or `posts:delete`
#[utoipa::path(
    delete,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    if !PostService::new(&state.db).delete(&current, id).await? {
        return Err(post_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn category_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

fn thread_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Thread {} not found", id))
}

fn post_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Post {} not found", id))
}
