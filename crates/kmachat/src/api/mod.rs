// Chat backend HTTP client.
//
// Thin endpoint layer over the shared ApiClient; returns wire DTOs.
// Domain mapping happens in the repository.

pub mod types;

use apibase::{ApiClient, ApiError};

use self::types::{ConversationDto, CreateConversationRequest, MessageDto, SendMessageRequest};

/// Raw client for the chat backend.
pub struct ChatClient {
    api: ApiClient,
}

impl ChatClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_conversations(&self) -> Result<Vec<ConversationDto>, ApiError> {
        self.api.get("conversations").await
    }

    pub async fn create_conversation(
        &self,
        title: Option<String>,
    ) -> Result<ConversationDto, ApiError> {
        self.api
            .post("conversations", &CreateConversationRequest { title })
            .await
    }

    pub async fn delete_conversation(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("conversations/{id}")).await
    }

    pub async fn list_messages(&self, conversation_id: &str) -> Result<Vec<MessageDto>, ApiError> {
        self.api
            .get(&format!("conversations/{conversation_id}/messages"))
            .await
    }

    /// Post a user message. The backend replies with the generated
    /// assistant message once generation finishes.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<MessageDto, ApiError> {
        self.api
            .post(
                &format!("conversations/{conversation_id}/messages"),
                &SendMessageRequest {
                    content: content.to_owned(),
                },
            )
            .await
    }
}
