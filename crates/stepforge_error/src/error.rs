//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, CredentialError, GeminiError, HttpError, JsonError, PipelineError,
    ShapeError, StorageError,
};

/// Every error condition a Stepforge operation can report.
///
/// # Examples
///
/// ```
/// use stepforge_error::{StepforgeError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StepforgeError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StepforgeErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storage error (input files and exports)
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Credential pool error
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Reply shape error
    #[from(ShapeError)]
    Shape(ShapeError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Stepforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use stepforge_error::{StepforgeError, StepforgeResult, ConfigError};
///
/// fn might_fail() -> StepforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Stepforge Error: {}", _0)]
pub struct StepforgeError(Box<StepforgeErrorKind>);

impl StepforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: StepforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StepforgeErrorKind {
        &self.0
    }

    /// Whether this error means no credential is left to try.
    ///
    /// The binary ends the run when this returns true.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            StepforgeErrorKind::Credential(CredentialError {
                kind: crate::CredentialErrorKind::Exhausted { .. },
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to StepforgeErrorKind
impl<T> From<T> for StepforgeError
where
    T: Into<StepforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Stepforge operations.
///
/// # Examples
///
/// ```
/// use stepforge_error::{StepforgeResult, HttpError};
///
/// fn fetch_data() -> StepforgeResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type StepforgeResult<T> = std::result::Result<T, StepforgeError>;
