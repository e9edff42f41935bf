//! Screen stores for the chat app. One feature per screen/flow, all
//! running on [`uniflow::Store`].

pub mod chat;
pub mod conversations;
pub mod server_setup;

pub use chat::{ChatAction, ChatEffect, ChatFeature, ChatState};
pub use conversations::{
    ConversationsAction, ConversationsEffect, ConversationsFeature, ConversationsState,
};
pub use server_setup::{
    ServerSetupAction, ServerSetupEffect, ServerSetupFeature, ServerSetupState,
};
