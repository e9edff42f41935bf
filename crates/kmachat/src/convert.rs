// ── API-to-domain conversions ──
//
// Bridges chat backend DTOs into domain types. Role strings are parsed
// into the closed enum; unknown roles degrade to User rather than failing
// the whole transcript.

use crate::api::types::{ConversationDto, MessageDto};
use crate::model::{Conversation, Message, Role};

fn parse_role(raw: &str) -> Role {
    match raw {
        "assistant" => Role::Assistant,
        _ => Role::User,
    }
}

impl From<ConversationDto> for Conversation {
    fn from(dto: ConversationDto) -> Self {
        Conversation {
            id: dto.id,
            title: dto.title,
            updated_at: dto.updated_at,
            message_count: dto.message_count,
        }
    }
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message {
            id: dto.id,
            conversation_id: dto.conversation_id,
            role: parse_role(&dto.role),
            text: dto.content,
            sent_at: dto.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unknown_role_degrades_to_user() {
        let dto = MessageDto {
            id: "m1".into(),
            conversation_id: "c1".into(),
            role: "system".into(),
            content: "hi".into(),
            created_at: Utc::now(),
        };
        assert_eq!(Message::from(dto).role, Role::User);
    }

    #[test]
    fn assistant_role_parses() {
        let dto = MessageDto {
            id: "m2".into(),
            conversation_id: "c1".into(),
            role: "assistant".into(),
            content: "hello".into(),
            created_at: Utc::now(),
        };
        assert_eq!(Message::from(dto).role, Role::Assistant);
    }
}
