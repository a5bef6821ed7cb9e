//! Credential pool errors.

/// Credential pool error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CredentialErrorKind {
    /// No credentials were configured
    #[display("Credential pool is empty; set [credentials].keys or the credentials env var")]
    EmptyPool,
    /// Every credential failed without an intervening success
    #[display("All {} credentials exhausted", pool_size)]
    Exhausted {
        /// Number of credentials in the pool
        pool_size: usize,
    },
}

/// Credential pool error with location tracking.
///
/// `Exhausted` is the one error in the workspace that ends a run.
///
/// # Examples
///
/// ```
/// use stepforge_error::{CredentialError, CredentialErrorKind};
///
/// let err = CredentialError::new(CredentialErrorKind::Exhausted { pool_size: 3 });
/// assert!(format!("{}", err).contains("All 3 credentials"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    /// The kind of error that occurred
    pub kind: CredentialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new credential error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
