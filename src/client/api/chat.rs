use crate::{
    client::{helper::parse_response, ApiClient, ApiError},
    model::{
        api::PaginatedDto,
        chat::{ChatMessageDto, SendChatMessageDto},
    },
};

impl ApiClient {
    /// Chat history, newest first.
    pub async fn get_chat_messages(
        &self,
        page: u64,
        entries: u64,
    ) -> Result<PaginatedDto<ChatMessageDto>, ApiError> {
        let response = self
            .get_page("/api/chat/messages", page, entries)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn send_chat_message(&self, content: &str) -> Result<ChatMessageDto, ApiError> {
        let response = self
            .post("/api/chat/messages")
            .json(&SendChatMessageDto {
                content: content.to_string(),
            })
            .send()
            .await?;
        parse_response(response).await
    }

    /// URL of the live chat socket, with the scheme switched to `ws`/`wss`.
    pub fn chat_socket_url(&self) -> String {
        let url = format!("{}/api/chat/ws", self.base_url());

        if let Some(rest) = url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_uses_websocket_scheme() {
        let client = ApiClient::new("https://sharkservers.example/").unwrap();
        assert_eq!(
            client.chat_socket_url(),
            "wss://sharkservers.example/api/chat/ws"
        );

        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.chat_socket_url(), "ws://localhost:8080/api/chat/ws");
    }
}
