//! Site-wide chat: persisted messages plus a live broadcast to WebSocket subscribers.

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use crate::server::{
    data::chat::ChatRepository,
    error::AppError,
    model::{
        chat::{validate_message, ChatMessage},
        pagination::{Page, PageParams},
    },
};

/// Messages buffered per subscriber before a slow socket starts skipping.
pub const CHAT_CHANNEL_CAPACITY: usize = 256;

/// Fan-out of persisted chat messages to every connected socket.
///
/// Backed by a bounded `tokio::sync::broadcast` channel. A receiver that falls more than
/// the capacity behind gets `RecvError::Lagged` and resumes with the newest messages.
#[derive(Clone)]
pub struct ChatBroadcaster {
    sender: broadcast::Sender<ChatMessage>,
}

impl ChatBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.sender.subscribe()
    }

    /// Sends to current subscribers and returns how many received it.
    pub fn publish(&self, message: ChatMessage) -> usize {
        // Err only means nobody is connected.
        self.sender.send(message).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChatBroadcaster {
    fn default() -> Self {
        Self::new(CHAT_CHANNEL_CAPACITY)
    }
}

pub struct ChatService<'a> {
    db: &'a DatabaseConnection,
    broadcaster: &'a ChatBroadcaster,
}

impl<'a> ChatService<'a> {
    pub fn new(db: &'a DatabaseConnection, broadcaster: &'a ChatBroadcaster) -> Self {
        Self { db, broadcaster }
    }

    /// Message history, newest first.
    pub async fn get_paginated(&self, params: PageParams) -> Result<Page<ChatMessage>, AppError> {
        Ok(ChatRepository::new(self.db).get_paginated(params).await?)
    }

    /// Validates, stores and broadcasts a message.
    ///
    /// # Returns
    /// - `Ok(ChatMessage)` - Stored message
    /// - `Err(AppError::BadRequest)` - Content blank or longer than 500 characters
    pub async fn send(
        &self,
        author: &entity::user::Model,
        content: &str,
    ) -> Result<ChatMessage, AppError> {
        let content = validate_message(content)?;

        let message = ChatRepository::new(self.db).create(author, content).await?;

        let delivered = self.broadcaster.publish(message.clone());
        tracing::debug!(
            "Chat message {} delivered to {} subscribers",
            message.id,
            delivered
        );

        Ok(message)
    }
}
