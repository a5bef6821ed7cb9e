//! Trait definitions for text generation backends.

use crate::GenerationOutcome;
use async_trait::async_trait;
use stepforge_error::StepforgeResult;

/// Core trait that generation backends implement.
///
/// A call awaits until the reply is classified. Implementations own their
/// credential state: failed outcomes have already rotated to the next
/// credential by the time `send` returns, so callers simply resend.
///
/// # Errors
///
/// `send` returns `Err` only when no credential is left to try. Transport
/// failures and service errors are reported as outcomes, never as errors.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Send one prompt and classify the reply.
    async fn send(&self, prompt: &str) -> StepforgeResult<GenerationOutcome>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}
