//! Gemini client with credential rotation.

use crate::gemini::{
    GenerateContentRequest, GenerateContentResponse, ReqwestTransport, Transport,
    TransportRequest, TransportResponse,
};
use async_trait::async_trait;
use std::sync::Arc;
use stepforge_core::strip_code_fence;
use stepforge_error::{GeminiError, GeminiErrorKind, StepforgeResult};
use stepforge_interface::{GenerationDriver, GenerationOutcome};
use stepforge_rate_limit::{CredentialRotator, GenerationConfig};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Client for the Gemini `generateContent` endpoint.
///
/// Every call uses the rotator's active credential. A reply with candidates
/// clears the rotator's exhausted set; any failed call rotates before `send`
/// returns, so the caller's next call goes out under a different key.
///
/// The rotator lock is only taken between awaits, never across one.
pub struct GeminiClient<T = ReqwestTransport> {
    transport: T,
    rotator: Arc<Mutex<CredentialRotator>>,
    model: String,
    endpoint: String,
    rate_limit_code: u16,
}

impl<T> std::fmt::Debug for GeminiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("rate_limit_code", &self.rate_limit_code)
            .finish_non_exhaustive()
    }
}

impl GeminiClient<ReqwestTransport> {
    /// Build a networked client from configuration and a credential pool.
    ///
    /// The active credential starts at a random index of `pool`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pool` is empty or the HTTP client cannot be created.
    #[instrument(name = "gemini_client_new", skip(config, pool), fields(model = %config.model))]
    pub fn from_config(config: &GenerationConfig, pool: Vec<String>) -> StepforgeResult<Self> {
        let rotator = CredentialRotator::new(pool)?;
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(transport, rotator, config))
    }
}

impl<T: Transport> GeminiClient<T> {
    /// Build a client over any transport.
    pub fn with_transport(transport: T, rotator: CredentialRotator, config: &GenerationConfig) -> Self {
        Self {
            transport,
            rotator: Arc::new(Mutex::new(rotator)),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            rate_limit_code: config.rate_limit_code,
        }
    }

    /// Shared handle to the credential rotator.
    pub fn rotator(&self) -> Arc<Mutex<CredentialRotator>> {
        Arc::clone(&self.rotator)
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full `generateContent` URL for the configured model.
    pub fn url(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }

    /// One request under `credential`, returning the unwrapped reply text.
    async fn exchange(&self, credential: String, prompt: &str) -> Result<String, GeminiError> {
        let body = serde_json::to_string(&GenerateContentRequest::from_prompt(prompt)).map_err(|e| {
            GeminiError::new(GeminiErrorKind::Transport(format!(
                "Failed to encode request: {}",
                e
            )))
        })?;

        let request = TransportRequest {
            url: self.url(),
            credential,
            body,
        };

        let response = self
            .transport
            .post(&request)
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::Transport(e.detail())))?;

        self.classify(&response)
    }

    /// Map a raw reply to text or the reason it carries none.
    fn classify(&self, response: &TransportResponse) -> Result<String, GeminiError> {
        let envelope: GenerateContentResponse =
            serde_json::from_str(&response.body).map_err(|e| {
                GeminiError::new(GeminiErrorKind::MalformedEnvelope(format!(
                    "HTTP {}: {}",
                    response.status, e
                )))
            })?;

        if envelope.candidates().is_some() {
            if let Some(usage) = envelope.usage_metadata() {
                debug!(
                    prompt_tokens = ?usage.prompt_token_count(),
                    candidate_tokens = ?usage.candidates_token_count(),
                    total_tokens = ?usage.total_token_count(),
                    "Token usage"
                );
            }
            return envelope
                .first_text()
                .map(|text| strip_code_fence(text).to_string())
                .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyCandidate));
        }

        if let Some(error) = envelope.error() {
            let code = (*error.code())
                .and_then(|code| u16::try_from(code).ok())
                .unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::Api {
                code,
                message: error.message().clone(),
            }));
        }

        Err(GeminiError::new(GeminiErrorKind::MalformedEnvelope(format!(
            "HTTP {}: reply has neither candidates nor error",
            response.status
        ))))
    }
}

#[async_trait]
impl<T: Transport> GenerationDriver for GeminiClient<T> {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn send(&self, prompt: &str) -> StepforgeResult<GenerationOutcome> {
        let (credential, index) = {
            let rotator = self.rotator.lock().await;
            (rotator.active().to_string(), rotator.active_index())
        };
        debug!(credential_index = index, "Sending generateContent request");

        match self.exchange(credential, prompt).await {
            Ok(text) => {
                self.rotator.lock().await.on_success();
                debug!(text_len = text.len(), "Generation succeeded");
                Ok(GenerationOutcome::Success(text))
            }
            Err(error) => {
                let rate_limited = error.kind.is_rate_limited(self.rate_limit_code);
                if rate_limited {
                    warn!(credential_index = index, "Rate limited");
                } else {
                    warn!(credential_index = index, error = %error.kind, "Generation failed");
                }

                self.rotator.lock().await.rotate()?;

                Ok(if rate_limited {
                    GenerationOutcome::RateLimited
                } else {
                    GenerationOutcome::OtherError(error.kind.to_string())
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
