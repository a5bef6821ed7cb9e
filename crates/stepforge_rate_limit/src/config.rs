//! Configuration for generation, credentials, and runs.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from stepforge.toml)
//! - `~/.config/stepforge/stepforge.toml`
//! - `./stepforge.toml`
//!
//! An explicit file passed to [`StepforgeConfig::load_with`] is layered on top.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stepforge_core::Language;
use stepforge_error::{ConfigError, StepforgeError, StepforgeResult};
use tracing::{debug, instrument, warn};

const DEFAULT_CONFIG: &str = include_str!("../../../stepforge.toml");

/// Settings for the generation service and the stage executors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Base URL of the generation API
    pub endpoint: String,
    /// Error code the service uses for rate limiting
    pub rate_limit_code: u16,
    /// Raw items per stage-1 batch
    pub decompose_batch_size: usize,
    /// Subtasks per stage-2 batch
    pub step_batch_size: usize,
    /// Attempts per batch before falling back to placeholders
    pub max_attempts: usize,
    /// Pause between failed attempts, in milliseconds
    pub retry_delay_ms: u64,
    /// Input-generation calls per case
    pub input_rounds: usize,
    /// Descriptions requested per input-generation call
    pub items_per_round: usize,
    /// Language of generated descriptions and subtasks
    pub language: Language,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            rate_limit_code: 429,
            decompose_batch_size: 20,
            step_batch_size: 20,
            max_attempts: 3,
            retry_delay_ms: 0,
            input_rounds: 5,
            items_per_round: 20,
            language: Language::English,
        }
    }
}

/// Where API keys come from.
///
/// Keys listed in the file and keys from the environment variable are
/// concatenated, file keys first.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Keys listed directly in configuration
    pub keys: Vec<String>,
    /// Environment variable holding comma-separated keys
    pub env_var: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("keys", &format_args!("[{} redacted]", self.keys.len()))
            .field("env_var", &self.env_var)
            .finish()
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            env_var: "GEMINI_API_KEYS".to_string(),
        }
    }
}

impl CredentialsConfig {
    /// Resolve the credential pool from configuration and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when neither source yields a key.
    #[instrument(skip(self), fields(env_var = %self.env_var))]
    pub fn resolve_pool(&self) -> StepforgeResult<Vec<String>> {
        let from_env = std::env::var(&self.env_var).ok();
        let pool = Self::merge_keys(&self.keys, from_env.as_deref());

        if pool.is_empty() {
            return Err(StepforgeError::from(ConfigError::new(format!(
                "No API keys configured; set [credentials].keys or {}",
                self.env_var
            ))));
        }

        debug!(pool_size = pool.len(), "Resolved credential pool");
        Ok(pool)
    }

    /// Combine configured keys with a comma-separated list, dropping blanks.
    pub fn merge_keys(configured: &[String], from_env: Option<&str>) -> Vec<String> {
        configured
            .iter()
            .map(|k| k.trim())
            .chain(from_env.into_iter().flat_map(|raw| raw.split(',')).map(str::trim))
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Settings for a batch run over many cases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of cases in a run
    pub files: usize,
    /// Every `test_every`-th case (1-based) is a test case; 0 disables
    pub test_every: usize,
    /// Directory holding generated input files
    pub input_dir: PathBuf,
    /// Directory receiving exported tables
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            files: 20,
            test_every: 4,
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Top-level Stepforge configuration.
///
/// # Example
///
/// ```no_run
/// use stepforge_rate_limit::StepforgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StepforgeConfig::load()?;
/// println!("model: {}", config.generation.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StepforgeConfig {
    /// Generation service and executor settings
    pub generation: GenerationConfig,
    /// Credential sources
    pub credentials: CredentialsConfig,
    /// Batch run settings
    pub run: RunConfig,
}

impl StepforgeConfig {
    /// Load configuration from a single file, without bundled defaults.
    ///
    /// Missing keys fall back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StepforgeResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StepforgeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StepforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load bundled defaults overridden by user configuration files.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the result is invalid.
    pub fn load() -> StepforgeResult<Self> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with an explicit file taking highest precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` is missing, any source cannot be parsed,
    /// or the merged configuration is invalid.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> StepforgeResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/stepforge/stepforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("stepforge").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                StepforgeError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StepforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot drive a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending setting.
    pub fn validate(&self) -> StepforgeResult<()> {
        let generation = &self.generation;
        let positive = [
            ("generation.decompose_batch_size", generation.decompose_batch_size),
            ("generation.step_batch_size", generation.step_batch_size),
            ("generation.max_attempts", generation.max_attempts),
            ("generation.input_rounds", generation.input_rounds),
            ("generation.items_per_round", generation.items_per_round),
        ];

        for (setting, value) in positive {
            if value == 0 {
                return Err(ConfigError::not_positive(setting).into());
            }
        }

        if self.run.files == 0 {
            warn!("run.files is 0, a run will process nothing");
        }

        Ok(())
    }
}
