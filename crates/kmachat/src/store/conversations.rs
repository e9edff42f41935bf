//! Conversation list store: load, create, open, and delete-with-confirm.

use std::sync::Arc;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::Conversation;
use crate::repository::ChatApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationsState {
    pub conversations: Vec<Conversation>,
    pub is_loading: bool,
    /// Conversation awaiting delete confirmation, if the dialog is open.
    pub pending_delete: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ConversationsAction {
    Load,
    Loaded(Vec<Conversation>),
    Create,
    Created(Conversation),
    Open(String),
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    Deleted(String),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversationsEffect {
    OpenChat(String),
}

pub struct ConversationsFeature {
    repo: Arc<dyn ChatApi>,
}

impl ConversationsFeature {
    pub fn new(repo: Arc<dyn ChatApi>) -> Self {
        Self { repo }
    }
}

impl Feature for ConversationsFeature {
    type State = ConversationsState;
    type Action = ConversationsAction;
    type Effect = ConversationsEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &ConversationsState,
        action: ConversationsAction,
        ctx: &mut Context<'_, Self>,
    ) -> ConversationsState {
        match action {
            ConversationsAction::Load => {
                let repo = Arc::clone(&self.repo);
                ctx.run(async move {
                    repo.conversations()
                        .await
                        .map(ConversationsAction::Loaded)
                });
                ConversationsState {
                    is_loading: true,
                    ..state.clone()
                }
            }

            ConversationsAction::Loaded(conversations) => ConversationsState {
                is_loading: false,
                conversations,
                ..state.clone()
            },

            ConversationsAction::Create => {
                let repo = Arc::clone(&self.repo);
                ctx.run(async move {
                    repo.create_conversation(None)
                        .await
                        .map(ConversationsAction::Created)
                });
                state.clone()
            }

            ConversationsAction::Created(conversation) => {
                let mut conversations = state.conversations.clone();
                let id = conversation.id.clone();
                conversations.insert(0, conversation);
                ctx.effect(ConversationsEffect::OpenChat(id));
                ConversationsState {
                    conversations,
                    ..state.clone()
                }
            }

            ConversationsAction::Open(id) => {
                ctx.effect(ConversationsEffect::OpenChat(id));
                state.clone()
            }

            ConversationsAction::RequestDelete(id) => ConversationsState {
                pending_delete: Some(id),
                ..state.clone()
            },

            ConversationsAction::CancelDelete => ConversationsState {
                pending_delete: None,
                ..state.clone()
            },

            ConversationsAction::ConfirmDelete => {
                let Some(id) = state.pending_delete.clone() else {
                    return state.clone();
                };
                let repo = Arc::clone(&self.repo);
                ctx.run(async move {
                    repo.delete_conversation(&id)
                        .await
                        .map(|()| ConversationsAction::Deleted(id))
                });
                ConversationsState {
                    pending_delete: None,
                    ..state.clone()
                }
            }

            ConversationsAction::Deleted(id) => {
                let mut conversations = state.conversations.clone();
                conversations.retain(|c| c.id != id);
                ConversationsState {
                    conversations,
                    ..state.clone()
                }
            }

            ConversationsAction::Failed(message) => ConversationsState {
                is_loading: false,
                error: Some(message),
                ..state.clone()
            },

            ConversationsAction::DismissError => ConversationsState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> ConversationsAction {
        ConversationsAction::Failed(error.to_string())
    }
}
