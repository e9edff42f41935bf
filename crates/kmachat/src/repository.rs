// ── Chat repository ──

use async_trait::async_trait;
use tracing::debug;

use apibase::ApiError;

use crate::api::ChatClient;
use crate::model::{Conversation, Message};

/// Data access seam for the chat stores.
///
/// Implementations must be `Send + Sync`; stores hold them behind an
/// `Arc<dyn ChatApi>` so tests can substitute an in-memory fake.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn conversations(&self) -> Result<Vec<Conversation>, ApiError>;

    async fn create_conversation(&self, title: Option<String>) -> Result<Conversation, ApiError>;

    async fn delete_conversation(&self, id: &str) -> Result<(), ApiError>;

    async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError>;

    /// Send the user's text; resolves to the generated assistant message.
    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message, ApiError>;
}

/// Production implementation over the chat backend.
pub struct ChatRepository {
    client: ChatClient,
}

impl ChatRepository {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatApi for ChatRepository {
    async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let dtos = self.client.list_conversations().await?;
        Ok(dtos.into_iter().map(Conversation::from).collect())
    }

    async fn create_conversation(&self, title: Option<String>) -> Result<Conversation, ApiError> {
        Ok(self.client.create_conversation(title).await?.into())
    }

    async fn delete_conversation(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_conversation(id).await
    }

    async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        let dtos = self.client.list_messages(conversation_id).await?;
        Ok(dtos.into_iter().map(Message::from).collect())
    }

    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message, ApiError> {
        debug!(conversation = conversation_id, "sending message");
        Ok(self.client.send_message(conversation_id, text).await?.into())
    }
}
