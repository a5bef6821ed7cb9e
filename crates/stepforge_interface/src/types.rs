//! Types shared by generation backends and the pipeline.

use serde::{Deserialize, Serialize};

/// Classified result of one generation call.
///
/// # Examples
///
/// ```
/// use stepforge_interface::GenerationOutcome;
///
/// let outcome = GenerationOutcome::Success("[\"Open the page\"]".to_string());
/// assert_eq!(outcome.text(), Some("[\"Open the page\"]"));
/// assert!(!GenerationOutcome::RateLimited.is_success());
/// assert_eq!(GenerationOutcome::RateLimited.to_string(), "rate limited");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GenerationOutcome {
    /// Reply text with any code fence already unwrapped
    #[display("success ({} chars)", _0.len())]
    Success(String),
    /// The service answered with its rate-limit code
    #[display("rate limited")]
    RateLimited,
    /// Anything else: transport failure, malformed body, other error object
    #[display("error: {}", _0)]
    OtherError(String),
}

impl GenerationOutcome {
    /// Whether the call produced text.
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }

    /// The reply text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success(text) => Some(text),
            _ => None,
        }
    }
}
