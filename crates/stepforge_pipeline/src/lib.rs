//! Batched two-stage generation pipeline for Stepforge.
//!
//! Raw UI test descriptions go through two dependent stages:
//!
//! 1. **Decompose**: each description becomes a group of atomic subtasks.
//! 2. **Steps**: every subtask becomes one executable [`StepRecord`](stepforge_core::StepRecord),
//!    and the results are regrouped to mirror stage 1.
//!
//! Both stages send items in batches through a [`StageExecutor`], which
//! resends on service failures, retries malformed replies a bounded number of
//! times, and falls back to empty placeholders so every item always gets
//! exactly one result.
//!
//! # Example
//!
//! ```no_run
//! use stepforge_models::GeminiClient;
//! use stepforge_pipeline::Pipeline;
//! use stepforge_rate_limit::StepforgeConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StepforgeConfig::load()?;
//! let client = GeminiClient::from_config(&config.generation, config.credentials.resolve_pool()?)?;
//! let pipeline = Pipeline::from_config(client, &config.generation)?;
//!
//! let raw = vec!["Open 'https://example.com' and verify the title is 'Example'".to_string()];
//! let output = pipeline.run(&raw).await?;
//! assert_eq!(output.task_list.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod executor;
mod input;
mod normalizer;
mod pipeline;
mod prompts;
mod reconcile;
mod stages;

pub use batch::{BatchOrchestrator, BatchStage};
pub use executor::{RetrySettings, RetrySettingsBuilder, StageExecutor};
pub use input::{
    parse_raw_items, read_input_file, render_input, sanitize_item, unquote_literals,
    write_input_file,
};
pub use normalizer::{ExpectedShape, FlatStrings, NestedStrings, StepObjects, normalize};
pub use pipeline::{Pipeline, PipelineOutput, PipelineSettings, PipelineSettingsBuilder};
pub use prompts::{decompose_prompt, enumerate_items, input_prompt, steps_prompt};
pub use reconcile::{StageReconciler, flatten_groups, regroup};
pub use stages::{DecomposeStage, StepStage};
