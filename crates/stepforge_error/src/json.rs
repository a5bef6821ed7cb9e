//! JSON error types.

/// JSON serialization error with source location.
///
/// Raised when writing exports. Reply parsing failures are reported as
/// [`ShapeError`](crate::ShapeError) instead, since they are retried.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} ({}) at line {} in {}", message, context, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// What was being serialized
    pub context: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for the given context at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepforge_error::JsonError;
    ///
    /// let err = JsonError::new("key must be a string", "task table");
    /// assert!(err.to_string().contains("task table"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            context: context.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
