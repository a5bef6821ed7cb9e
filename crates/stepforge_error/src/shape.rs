//! Reply shape errors.

/// Why a reply did not match the shape a stage expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ShapeErrorKind {
    /// Reply text is not valid JSON
    #[display("Invalid JSON: {}", _0)]
    InvalidJson(String),
    /// Top-level value is not an array
    #[display("Expected a JSON array, got {}", _0)]
    NotAnArray(String),
    /// Array has the wrong number of elements
    #[display("Expected {} elements, got {}", expected, actual)]
    LengthMismatch {
        /// Required length
        expected: usize,
        /// Length of the reply
        actual: usize,
    },
    /// An element has the wrong JSON type
    #[display("Element {} is not {}", index, expected)]
    ElementType {
        /// Zero-based position of the offending element
        index: usize,
        /// Description of the required type
        expected: &'static str,
    },
}

/// Shape error carrying the raw reply for diagnostics.
///
/// # Examples
///
/// ```
/// use stepforge_error::{ShapeError, ShapeErrorKind};
///
/// let err = ShapeError::new(
///     ShapeErrorKind::LengthMismatch { expected: 2, actual: 1 },
///     "[[\"Open the page\"]]",
/// );
/// assert_eq!(err.raw, "[[\"Open the page\"]]");
/// assert!(format!("{}", err).contains("Expected 2 elements, got 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Shape Error: {} at line {} in {}", kind, line, file)]
pub struct ShapeError {
    /// The kind of error that occurred
    pub kind: ShapeErrorKind,
    /// Reply text as received, before fence stripping
    pub raw: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ShapeError {
    /// Create a new shape error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ShapeErrorKind, raw: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            raw: raw.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
