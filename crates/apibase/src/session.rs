// ── Explicit session context ──
//
// The signed-in user travels with the repositories that need it instead of
// living in a process-wide global. Stores install a session after login and
// clear it on logout or when the backend reports 401.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};

/// An authenticated user and their bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub display_name: Option<String>,
    pub token: SecretString,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        display_name: Option<String>,
        token: SecretString,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
            token,
        }
    }
}

/// Shared, swappable session cell.
///
/// Cheap to clone; all clones observe the same session. Reads are lock-free.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<ArcSwapOption<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session (after login).
    pub fn install(&self, session: Session) {
        self.inner.store(Some(Arc::new(session)));
    }

    /// Drop the session (logout, or the backend said 401).
    pub fn clear(&self) {
        self.inner.store(None);
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.inner.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.load().is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.inner.load().as_ref().map(|s| s.user_id.clone())
    }

    /// The current token, for callers that persist it (remember-login).
    pub fn token(&self) -> Option<SecretString> {
        self.inner.load().as_ref().map(|s| s.token.clone())
    }

    /// The raw bearer token, exposed for building the Authorization header.
    pub(crate) fn bearer_token(&self) -> Option<String> {
        self.inner
            .load()
            .as_ref()
            .map(|s| s.token.expose_secret().to_owned())
    }
}
