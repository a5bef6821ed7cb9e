//! HTTP transport error types.

/// Transport-level failure talking to the generation service.
///
/// The Gemini client never lets this escape `send`; it is logged and
/// classified as an `OtherError` outcome, which triggers a credential rotation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// HTTP status, when the failure happened after a response arrived
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepforge_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the HTTP status the server answered with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Message with the answering status appended when one is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepforge_error::HttpError;
    ///
    /// let err = HttpError::new("Failed to read response body").with_status(502);
    /// assert_eq!(err.detail(), "Failed to read response body (status 502)");
    /// ```
    pub fn detail(&self) -> String {
        match self.status {
            Some(status) => format!("{} (status {})", self.message, status),
            None => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_without_status_is_message() {
        let err = HttpError::new("Request failed: connection reset");
        assert_eq!(err.detail(), "Request failed: connection reset");
    }

    #[test]
    fn test_detail_carries_status() {
        let err = HttpError::new("Failed to read response body").with_status(502);
        assert!(err.detail().contains("502"));
        assert!(err.detail().starts_with("Failed to read response body"));
    }
}
