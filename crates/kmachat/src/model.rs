// ── Chat domain types ──

use chrono::{DateTime, Utc};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One conversation in the sidebar list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: u32,
}

/// One chat bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Build the locally-echoed user message that is appended to the
    /// transcript before the backend round-trip completes.
    pub fn local_user(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: conversation_id.into(),
            role: Role::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}
