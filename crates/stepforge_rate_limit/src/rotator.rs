//! Credential pool rotation.

use rand::Rng;
use std::collections::BTreeSet;
use stepforge_error::{CredentialError, CredentialErrorKind};
use tracing::{debug, instrument, warn};

/// Pool of access credentials with exactly one active at a time.
///
/// Every failed call marks the active credential exhausted and advances to
/// the next index, wrapping around the pool. A success clears the exhausted
/// set, so a key that failed earlier becomes usable again. Once every index
/// has failed without an intervening success the pool is spent and
/// [`rotate`](Self::rotate) returns [`CredentialErrorKind::Exhausted`].
///
/// The advance does not skip indices that are already exhausted. The size
/// check runs before the index moves, so a wrap onto a spent key is only
/// possible while some other key is still untried.
///
/// # Example
///
/// ```
/// use stepforge_rate_limit::CredentialRotator;
///
/// let mut rotator = CredentialRotator::with_start(
///     vec!["key-a".to_string(), "key-b".to_string()],
///     1,
/// ).unwrap();
/// assert_eq!(rotator.active(), "key-b");
///
/// rotator.rotate().unwrap();
/// assert_eq!(rotator.active(), "key-a");
///
/// // Both keys failed without a success in between.
/// assert!(rotator.rotate().is_err());
/// ```
pub struct CredentialRotator {
    pool: Vec<String>,
    active_index: usize,
    exhausted: BTreeSet<usize>,
    rotations: usize,
}

impl std::fmt::Debug for CredentialRotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRotator")
            .field("pool_size", &self.pool.len())
            .field("active_index", &self.active_index)
            .field("exhausted", &self.exhausted)
            .field("rotations", &self.rotations)
            .finish_non_exhaustive()
    }
}

impl CredentialRotator {
    /// Create a rotator starting at a random index.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialErrorKind::EmptyPool`] when `pool` is empty.
    #[instrument(skip(pool), fields(pool_size = pool.len()))]
    pub fn new(pool: Vec<String>) -> Result<Self, CredentialError> {
        if pool.is_empty() {
            return Err(CredentialError::new(CredentialErrorKind::EmptyPool));
        }
        let start = rand::thread_rng().gen_range(0..pool.len());
        Self::with_start(pool, start)
    }

    /// Create a rotator starting at `start` (taken modulo the pool size).
    ///
    /// # Errors
    ///
    /// Returns [`CredentialErrorKind::EmptyPool`] when `pool` is empty.
    pub fn with_start(pool: Vec<String>, start: usize) -> Result<Self, CredentialError> {
        if pool.is_empty() {
            return Err(CredentialError::new(CredentialErrorKind::EmptyPool));
        }
        let active_index = start % pool.len();
        debug!(pool_size = pool.len(), active_index, "Credential pool ready");
        Ok(Self {
            pool,
            active_index,
            exhausted: BTreeSet::new(),
            rotations: 0,
        })
    }

    /// The credential requests should currently use.
    pub fn active(&self) -> &str {
        &self.pool[self.active_index]
    }

    /// Index of the active credential.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Indices that failed since the last success.
    pub fn exhausted(&self) -> &BTreeSet<usize> {
        &self.exhausted
    }

    /// Number of credentials in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Number of times the active index has advanced.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Mark the active credential failed and advance to the next one.
    ///
    /// Returns the new active index.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialErrorKind::Exhausted`] when every credential has
    /// now failed since the last success. The active index does not move in
    /// that case; no further request should be made.
    #[instrument(skip(self), fields(active_index = self.active_index, pool_size = self.pool.len()))]
    pub fn rotate(&mut self) -> Result<usize, CredentialError> {
        self.exhausted.insert(self.active_index);
        warn!(
            failed_index = self.active_index,
            exhausted = self.exhausted.len(),
            "Credential failed, switching"
        );

        if self.exhausted.len() >= self.pool.len() {
            return Err(CredentialError::new(CredentialErrorKind::Exhausted {
                pool_size: self.pool.len(),
            }));
        }

        self.active_index = (self.active_index + 1) % self.pool.len();
        self.rotations += 1;
        debug!(active_index = self.active_index, "Rotated to next credential");
        Ok(self.active_index)
    }

    /// Record a successful call, clearing the exhausted set.
    pub fn on_success(&mut self) {
        if !self.exhausted.is_empty() {
            debug!(cleared = self.exhausted.len(), "Success, clearing exhausted credentials");
        }
        self.exhausted.clear();
    }
}
