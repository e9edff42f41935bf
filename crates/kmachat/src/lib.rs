//! KMAChat app core: chat API client, domain model, and screen stores.
//!
//! The UI layer (whatever renders it) subscribes to each store's state
//! stream, forwards user intent as actions, and reacts to one-shot effects.

pub mod api;
pub mod convert;
pub mod model;
pub mod repository;
pub mod store;

pub use model::{Conversation, Message, Role};
pub use repository::{ChatApi, ChatRepository};
