//! Pipeline error types.

/// Specific error conditions for pipeline assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Batch size of zero
    #[display("Batch size for {} must be at least 1", _0)]
    InvalidBatchSize(String),
    /// Input pattern failed to compile
    #[display("Invalid input pattern: {}", _0)]
    InvalidPattern(String),
    /// Flat results do not cover the recorded group lengths
    #[display("Cannot regroup {} results into groups totalling {}", results, expected)]
    Reconstruction {
        /// Number of flat results available
        results: usize,
        /// Sum of the recorded group lengths
        expected: usize,
    },
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use stepforge_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::InvalidBatchSize("decompose".to_string()));
/// assert!(format!("{}", err).contains("decompose"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
