//! Request/response transport for the Gemini client.

use async_trait::async_trait;
use reqwest::Client;
use stepforge_error::{GeminiError, GeminiErrorKind, HttpError};
use tracing::{debug, instrument};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// One outbound request: target, credential, and JSON body.
#[derive(Clone)]
pub struct TransportRequest {
    /// Full endpoint URL
    pub url: String,
    /// API key for this call
    pub credential: String,
    /// Serialized request body
    pub body: String,
}

impl std::fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRequest")
            .field("url", &self.url)
            .field("credential", &"<redacted>")
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Raw reply: HTTP status and body text.
///
/// The body decides classification; Gemini puts its error object in the
/// body of non-2xx replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text
    pub body: String,
}

/// Sends one request and returns the raw reply.
///
/// Implementations report only failures where no body could be read.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the full reply body.
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse, HttpError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::ClientCreation`] if the TLS backend cannot initialize.
    #[instrument(name = "reqwest_transport_new")]
    pub fn new() -> Result<Self, GeminiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse, HttpError> {
        let response = self
            .client
            .post(&request.url)
            .header(API_KEY_HEADER, &request.credential)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            HttpError::new(format!("Failed to read response body: {}", e)).with_status(status)
        })?;

        debug!(status, body_len = body.len(), "Received response");
        Ok(TransportResponse { status, body })
    }
}
