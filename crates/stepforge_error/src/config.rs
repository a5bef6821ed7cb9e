//! Configuration error types.

/// Configuration error with source location.
///
/// Covers unreadable or unparsable configuration files as well as values that
/// parse but cannot drive a run (zero batch sizes, an empty credential pool).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepforge_error::ConfigError;
    ///
    /// let err = ConfigError::new("step_batch_size must be at least 1");
    /// assert!(err.message.contains("step_batch_size"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a numeric setting that must be positive.
    #[track_caller]
    pub fn not_positive(setting: &str) -> Self {
        Self::new(format!("{} must be at least 1", setting))
    }
}
