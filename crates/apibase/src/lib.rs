//! Shared REST plumbing for the KMA apps.
//!
//! One transport builder, one flat error taxonomy with a single
//! status/transport-to-error mapping, and the explicit session context the
//! repositories carry instead of a process-wide user global.

pub mod client;
pub mod error;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::{Session, SessionHandle};
pub use transport::TransportConfig;
