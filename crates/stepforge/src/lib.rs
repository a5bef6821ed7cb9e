//! Stepforge: resilient two-stage generation of synthetic UI test data.
//!
//! Raw UI test descriptions are decomposed into atomic subtasks, and every
//! subtask is expanded into one executable step, through a generation service
//! that rate-limits and answers in loosely formatted text. Credentials rotate
//! on failure, malformed replies are retried a bounded number of times, and
//! batches that never produce a usable reply fall back to placeholders so
//! both result tables stay aligned with their inputs.
//!
//! # Architecture
//!
//! - `stepforge_error` - Error types
//! - `stepforge_core` - Step records, trace pairs, dataset splits
//! - `stepforge_interface` - `GenerationDriver` trait
//! - `stepforge_rate_limit` - Credential rotation and configuration
//! - `stepforge_models` - Gemini client
//! - `stepforge_pipeline` - Normalizer, executor, batching, reconciliation
//!
//! This crate re-exports them and adds the exporter, the multi-case runner
//! and logging setup used by the `stepforge` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod exporter;
mod observability;
mod runner;

pub use exporter::{ExportPaths, Exporter, SummaryRow, summary_rows};
pub use observability::{ObservabilityConfig, init_observability};
pub use runner::{CaseReport, CaseRunner, RunSummary};

pub use stepforge_core::*;
pub use stepforge_error::*;
pub use stepforge_interface::*;
pub use stepforge_models::{GeminiClient, ReqwestTransport, Transport};
pub use stepforge_pipeline::*;
pub use stepforge_rate_limit::*;
