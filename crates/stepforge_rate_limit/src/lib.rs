//! Credential rotation and run configuration.
//!
//! The generation service answers rate-limited or failing credentials with an
//! error object. Rather than backing off on one key, Stepforge keeps a pool of
//! keys and moves to the next one on every failure. [`CredentialRotator`]
//! owns that pool and decides when the pool is spent.
//!
//! [`StepforgeConfig`] carries every fixed parameter of a run: the model,
//! batch sizes, retry budget, credential sources and output layout.

mod config;
mod rotator;

pub use config::{CredentialsConfig, GenerationConfig, RunConfig, StepforgeConfig};
pub use rotator::CredentialRotator;
