// Shared transport configuration for building reqwest::Client instances.
//
// Both app clients share timeout and TLS settings through this module so
// builder logic isn't duplicated per backend.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

const USER_AGENT: &str = concat!("kma-apps/", env!("CARGO_PKG_VERSION"));

/// Transport settings for one backend.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Backend root, e.g. `https://api.medmeet.example`.
    pub base_url: Url,
    pub timeout: Duration,
    /// Accept self-signed certificates (development servers only).
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| ApiError::Unknown(format!("failed to build HTTP client: {e}")))
    }
}
