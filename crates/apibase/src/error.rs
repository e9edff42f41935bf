use thiserror::Error;

/// Flat error taxonomy for every backend call in both apps.
///
/// Produced exclusively by the mapping in [`crate::client`] so repositories
/// and stores see one closed set of failure kinds regardless of endpoint.
/// Every error is terminal for its one operation: no retries, no backoff.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the server (connection refused, DNS failure).
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("connection timed out")]
    Timeout,

    /// The server failed (HTTP 5xx).
    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    /// The request was rejected (HTTP 4xx other than 401).
    #[error("request failed (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// HTTP 401 -- the session token is missing, expired, or revoked.
    #[error("session expired -- sign in again")]
    SessionExpired,

    /// The response body did not deserialize into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Client-side validation rejected the input before any request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Anything that fits none of the above.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns `true` for errors a user could plausibly clear by retrying
    /// manually (the apps never retry on their own).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout | Self::Server { .. }
        )
    }

    /// Map an HTTP status code to the corresponding error kind.
    ///
    /// `message` is the server-provided diagnostic for 4xx responses, when
    /// the body carried one.
    pub(crate) fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::SessionExpired,
            400..=499 => Self::Http {
                status,
                message: message.unwrap_or_else(|| format!("HTTP {status}")),
            },
            500..=599 => Self::Server { status },
            other => Self::Unknown(format!("unexpected HTTP status {other}")),
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() {
            Self::Network(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
