// Repository base: HTTP verb helpers with the uniform error mapping.
//
// Every backend call in both apps goes through this client, so the
// status-to-error translation (401 session expiry, 4xx rejection, 5xx
// server fault) and the transport classification live in exactly one place.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::session::SessionHandle;
use crate::transport::TransportConfig;

/// Diagnostic body shape shared by both backends' error responses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Authenticated JSON client for one backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionHandle,
}

impl ApiClient {
    /// Build a client from transport settings. The session handle may be
    /// empty; requests simply go out without an Authorization header until
    /// a session is installed.
    pub fn new(transport: &TransportConfig, session: SessionHandle) -> Result<Self, ApiError> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: transport.base_url.clone(),
            session,
        })
    }

    /// Wrap a pre-built `reqwest::Client` (tests, custom transports).
    pub fn with_client(http: reqwest::Client, base_url: Url, session: SessionHandle) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an API path.
    fn url(&self, path: &str) -> Url {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.send(self.http.get(url)).await?;
        Self::decode(resp).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {url}");
        let resp = self.send(self.http.post(url).json(body)).await?;
        Self::decode(resp).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("PUT {url}");
        let resp = self.send(self.http.put(url).json(body)).await?;
        Self::decode(resp).await
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!("DELETE {url}");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    // ── Shared mapping ───────────────────────────────────────────────

    /// Attach the bearer token, send, and translate failures.
    ///
    /// A 401 clears the session handle so every consumer observes the
    /// expiry at once, then surfaces as [`ApiError::SessionExpired`].
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let req = match self.session.bearer_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);

        let err = ApiError::from_status(status.as_u16(), message);
        if err.is_session_expired() {
            debug!("401 from backend, clearing session");
            self.session.clear();
        }
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
