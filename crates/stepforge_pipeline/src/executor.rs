//! Retry-bounded execution of one prompt against one expected shape.

use crate::{ExpectedShape, normalize};
use derive_builder::Builder;
use derive_getters::Getters;
use stepforge_error::{BuilderError, StepforgeError, StepforgeResult};
use stepforge_interface::{GenerationDriver, GenerationOutcome};
use stepforge_rate_limit::GenerationConfig;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Attempt budget for malformed replies.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::RetrySettings;
///
/// let settings = RetrySettings::builder().max_attempts(5_usize).build().unwrap();
/// assert_eq!(*settings.max_attempts(), 5);
/// assert_eq!(*settings.retry_delay_ms(), 0);
///
/// assert!(RetrySettings::builder().max_attempts(0_usize).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Getters)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct RetrySettings {
    /// Replies that may fail normalization before the fallback is used
    #[builder(default = "3")]
    max_attempts: usize,
    /// Pause between failed attempts, in milliseconds
    #[builder(default = "0")]
    retry_delay_ms: u64,
}

impl RetrySettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == Some(0) {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 0,
        }
    }
}

impl RetrySettings {
    /// Creates a new settings builder.
    pub fn builder() -> RetrySettingsBuilder {
        RetrySettingsBuilder::default()
    }

    /// Settings taken from the `[generation]` section.
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if `max_attempts` is zero.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, BuilderError> {
        Self::builder()
            .max_attempts(config.max_attempts)
            .retry_delay_ms(config.retry_delay_ms)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))
    }
}

/// Runs one prompt until its reply normalizes or the attempt budget is spent.
///
/// Rate-limited and failed calls are resent at once and do not count as
/// attempts; the driver has already rotated credentials for them. Only
/// replies that fail normalization use up the budget. When the budget is
/// spent the caller's fallback supplies the result, so `run` only fails when
/// the driver reports that no credential is left.
#[derive(Debug)]
pub struct StageExecutor<D> {
    driver: D,
    settings: RetrySettings,
}

impl<D: GenerationDriver> StageExecutor<D> {
    /// Create an executor over `driver`.
    pub fn new(driver: D, settings: RetrySettings) -> Self {
        Self { driver, settings }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The attempt budget.
    pub fn settings(&self) -> &RetrySettings {
        &self.settings
    }

    /// Send `prompt` and normalize the reply against `shape`.
    ///
    /// # Errors
    ///
    /// Only a fatal driver error (credential exhaustion) is returned.
    #[instrument(
        skip(self, prompt, shape, fallback),
        fields(prompt_len = prompt.len(), max_attempts = self.settings.max_attempts)
    )]
    pub async fn run<S, F>(&self, prompt: &str, shape: &S, fallback: F) -> StepforgeResult<S::Output>
    where
        S: ExpectedShape + ?Sized,
        F: FnOnce() -> S::Output,
    {
        let strategy = FixedInterval::from_millis(self.settings.retry_delay_ms)
            .take(self.settings.max_attempts.saturating_sub(1));

        let mut attempts = 0_usize;
        let result = Retry::spawn(strategy, || {
            attempts += 1;
            let attempt = attempts;
            async move {
                let text = self
                    .send_until_success(prompt)
                    .await
                    .map_err(RetryError::Permanent)?;

                normalize(&text, shape).map_err(|e| {
                    warn!(
                        attempt,
                        max_attempts = self.settings.max_attempts,
                        error = %e.kind,
                        raw = %e.raw,
                        "Reply did not match expected shape"
                    );
                    RetryError::Transient {
                        err: StepforgeError::from(e),
                        retry_after: None,
                    }
                })
            }
        })
        .await;

        match result {
            Ok(value) => {
                debug!(attempts, "Reply normalized");
                Ok(value)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(attempts, error = %e, "Attempt budget spent, using placeholder result");
                Ok(fallback())
            }
        }
    }

    /// Resend until the driver yields text.
    async fn send_until_success(&self, prompt: &str) -> StepforgeResult<String> {
        loop {
            match self.driver.send(prompt).await? {
                GenerationOutcome::Success(text) => return Ok(text),
                GenerationOutcome::RateLimited => {
                    debug!("Rate limited, resending with next credential");
                }
                GenerationOutcome::OtherError(reason) => {
                    debug!(%reason, "Call failed, resending with next credential");
                }
            }
        }
    }
}
