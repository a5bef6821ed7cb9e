//! Gemini-specific error types.

/// Gemini-specific error conditions.
///
/// These describe why a single `generateContent` call did not yield text.
/// The client turns each of them into a classified outcome rather than
/// returning them, so they mostly surface in logs and in
/// `GenerationOutcome::OtherError` details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Request never produced a readable body
    #[display("Gemini transport failed: {}", _0)]
    Transport(String),
    /// The body carried an `error` object
    #[display("Gemini API error {}: {}", code, message)]
    Api {
        /// Numeric code from the error object
        code: u16,
        /// Message from the error object
        message: String,
    },
    /// The body was not JSON, or had neither candidates nor an error object
    #[display("Malformed Gemini response: {}", _0)]
    MalformedEnvelope(String),
    /// Candidates were present but held no text part
    #[display("Gemini candidate carried no text")]
    EmptyCandidate,
}

impl GeminiErrorKind {
    /// Whether this is an error object carrying `rate_limit_code`, the code
    /// the service uses to ask for back-off.
    pub fn is_rate_limited(&self, rate_limit_code: u16) -> bool {
        matches!(self, GeminiErrorKind::Api { code, .. } if *code == rate_limit_code)
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use stepforge_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::Api {
///     code: 429,
///     message: "Resource has been exhausted".to_string(),
/// });
/// assert!(err.kind.is_rate_limited(429));
/// assert!(!err.kind.is_rate_limited(503));
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
