//! Chat message domain model.

use chrono::{DateTime, Utc};

use crate::{
    model::chat::ChatMessageDto,
    server::{error::AppError, model::user::Author},
};

pub const MESSAGE_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: i32,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_entity(
        entity: entity::chat_message::Model,
        author: Option<&entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            author: Author::from_entity(entity.author_id, author),
            content: entity.content,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ChatMessageDto {
        ChatMessageDto {
            id: self.id,
            author: self.author.into_dto(),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Trims the message and checks it is 1..=`MESSAGE_MAX` characters.
pub fn validate_message(content: &str) -> Result<String, AppError> {
    let content = content.trim();
    let len = content.chars().count();

    if len == 0 || len > MESSAGE_MAX {
        return Err(AppError::BadRequest(format!(
            "Message must be between 1 and {} characters",
            MESSAGE_MAX
        )));
    }

    Ok(content.to_string())
}
