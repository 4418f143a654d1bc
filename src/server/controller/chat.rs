//! Site chat over REST and WebSocket.
//!
//! Both paths persist through `ChatService`, which broadcasts each stored message to every
//! connected socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        chat::{ChatEventDto, ChatMessageDto, SendChatMessageDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            chat::ChatMessage,
            pagination::{PageParams, PaginationQuery},
        },
        scopes,
        service::chat::ChatService,
        state::AppState,
    },
};

/// Tag for grouping chat endpoints in OpenAPI documentation
pub static CHAT_TAG: &str = "chat";

/// Chat history, newest first.
///
/// # Access Control
/// - `chat:all`
#[utoipa::path(
    get,
    path = "/api/chat/messages",
    tag = CHAT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of messages", body = PaginatedDto<ChatMessageDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_messages(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CHAT_ALL)])
        .await?;

    let messages = ChatService::new(&state.db, &state.chat)
        .get_paginated(PageParams::try_from(query)?)
        .await?;

    Ok((StatusCode::OK, Json(messages.into_dto(ChatMessage::into_dto))))
}

/// Send a chat message. It is also pushed to every connected WebSocket.
///
/// # Access Control
/// - `chat:create`
#[utoipa::path(
    post,
    path = "/api/chat/messages",
    tag = CHAT_TAG,
    request_body = SendChatMessageDto,
    responses(
        (status = 201, description = "Message sent", body = ChatMessageDto),
        (status = 400, description = "Empty or too long message", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SendChatMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CHAT_CREATE)])
        .await?;

    let message = ChatService::new(&state.db, &state.chat)
        .send(&current.user, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message.into_dto())))
}

/// Live chat socket.
///
/// Pushes every new message as a `{"type":"message"}` frame. Text frames from the client
/// are sent as messages when the user holds `chat:create`; otherwise, or when the content
/// is invalid, an `{"type":"error"}` frame is returned to that client only.
///
/// # Access Control
/// - `chat:all`
#[utoipa::path(
    get,
    path = "/api/chat/ws",
    tag = CHAT_TAG,
    responses(
        (status = 101, description = "Switching to WebSocket"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing scope", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn chat_socket(
    State(state): State<AppState>,
    session: Session,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Scope(scopes::CHAT_ALL)])
        .await?;

    tracing::debug!("User {} opened a chat socket", current.id());

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session)))
}

async fn handle_socket(socket: WebSocket, state: AppState, session: Session) {
    let (mut sender, mut receiver) = socket.split();
    let mut messages = state.chat.subscribe();

    loop {
        let event = tokio::select! {
            broadcast = messages.recv() => match broadcast {
                Ok(message) => ChatEventDto::Message { message: message.into_dto() },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Chat socket lagged, skipped {} messages", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match send_from_socket(&state, &session, text.as_str()).await {
                        // Delivered to this socket through the broadcast.
                        Ok(()) => continue,
                        Err(error) => ChatEventDto::Error { error },
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(err)) => {
                    tracing::debug!("Chat socket error: {}", err);
                    break;
                }
            },
        };

        let frame = match serde_json::to_string(&event) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!("Failed to serialize chat event: {}", err);
                continue;
            }
        };

        if sender.send(Message::Text(frame.into())).await.is_err() {
            break;
        }
    }
}

/// Re-authorizes the session for every frame so revoked scopes or deactivation apply
/// to open sockets.
async fn send_from_socket(state: &AppState, session: &Session, content: &str) -> Result<(), String> {
    let current = AuthGuard::new(&state.db, session)
        .require(&[Permission::Scope(scopes::CHAT_CREATE)])
        .await
        .map_err(socket_error_message)?;

    ChatService::new(&state.db, &state.chat)
        .send(&current.user, content)
        .await
        .map(|_| ())
        .map_err(socket_error_message)
}

/// Text of an error frame. Only auth and validation errors reach the client verbatim.
fn socket_error_message(err: AppError) -> String {
    match err {
        AppError::AuthErr(err) => {
            tracing::debug!("Chat socket denied: {}", err);
            err.status_and_message().1
        }
        AppError::BadRequest(msg) => msg,
        err => {
            tracing::error!("Chat socket failed: {}", err);
            "Internal server error".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::error::auth::AuthError;

    #[test]
    fn socket_errors_hide_internal_details() {
        let db_err = AppError::DbErr(sea_orm::DbErr::Custom("no such table: user".to_string()));
        assert_eq!(socket_error_message(db_err), "Internal server error");

        assert_eq!(
            socket_error_message(AuthError::UserNotInDatabase(7).into()),
            "Not authenticated"
        );
        assert_eq!(
            socket_error_message(
                AuthError::MissingScopes {
                    missing: vec!["chat:create".to_string()]
                }
                .into()
            ),
            "Missing required scopes: chat:create"
        );
        assert_eq!(
            socket_error_message(AppError::BadRequest("Too long".to_string())),
            "Too long"
        );
    }
}
