//! Chat screen store: one conversation's transcript and the send flow.

use std::sync::Arc;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::Message;
use crate::repository::ChatApi;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub conversation_id: String,
    pub messages: Vec<Message>,
    pub draft: String,
    pub is_loading: bool,
    /// Guard: while the backend is generating a reply, further sends are
    /// ignored.
    pub is_generating: bool,
    pub error: Option<String>,
}

impl ChatState {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            messages: Vec::new(),
            draft: String::new(),
            is_loading: false,
            is_generating: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChatAction {
    /// Screen appeared: load the transcript.
    Opened,
    HistoryLoaded(Vec<Message>),
    DraftChanged(String),
    SendMessage { text: String },
    /// The backend finished generating; here is the assistant message.
    MessageSent(Message),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEffect {
    ScrollToBottom,
}

pub struct ChatFeature {
    repo: Arc<dyn ChatApi>,
}

impl ChatFeature {
    pub fn new(repo: Arc<dyn ChatApi>) -> Self {
        Self { repo }
    }
}

impl Feature for ChatFeature {
    type State = ChatState;
    type Action = ChatAction;
    type Effect = ChatEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &ChatState,
        action: ChatAction,
        ctx: &mut Context<'_, Self>,
    ) -> ChatState {
        match action {
            ChatAction::Opened => {
                let repo = Arc::clone(&self.repo);
                let id = state.conversation_id.clone();
                ctx.run(async move { repo.messages(&id).await.map(ChatAction::HistoryLoaded) });
                ChatState {
                    is_loading: true,
                    ..state.clone()
                }
            }

            ChatAction::HistoryLoaded(messages) => ChatState {
                is_loading: false,
                messages,
                ..state.clone()
            },

            ChatAction::DraftChanged(draft) => ChatState {
                draft,
                ..state.clone()
            },

            ChatAction::SendMessage { text } => {
                let text = text.trim().to_owned();
                if state.is_generating || text.is_empty() {
                    return state.clone();
                }

                // Echo the user's message into the transcript before the
                // round-trip; the backend reply arrives as MessageSent.
                let mut messages = state.messages.clone();
                messages.push(Message::local_user(&state.conversation_id, &text));

                let repo = Arc::clone(&self.repo);
                let id = state.conversation_id.clone();
                ctx.run(async move {
                    repo.send_message(&id, &text)
                        .await
                        .map(ChatAction::MessageSent)
                });
                ctx.effect(ChatEffect::ScrollToBottom);

                ChatState {
                    messages,
                    draft: String::new(),
                    is_generating: true,
                    ..state.clone()
                }
            }

            ChatAction::MessageSent(message) => {
                let mut messages = state.messages.clone();
                messages.push(message);
                ctx.effect(ChatEffect::ScrollToBottom);
                ChatState {
                    messages,
                    is_generating: false,
                    ..state.clone()
                }
            }

            ChatAction::Failed(message) => ChatState {
                is_loading: false,
                is_generating: false,
                error: Some(message),
                ..state.clone()
            },

            ChatAction::DismissError => ChatState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> ChatAction {
        ChatAction::Failed(error.to_string())
    }
}
