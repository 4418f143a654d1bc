use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::AuthorDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ChatMessageDto {
    pub id: i32,
    pub author: AuthorDto,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SendChatMessageDto {
    pub content: String,
}

/// Frame pushed to WebSocket subscribers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEventDto {
    Message { message: ChatMessageDto },
    Error { error: String },
}
