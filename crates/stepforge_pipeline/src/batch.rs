//! Partitioning items into batches and distributing batch results back.

use crate::{ExpectedShape, StageExecutor};
use stepforge_core::Trace;
use stepforge_error::{PipelineError, PipelineErrorKind, StepforgeResult};
use stepforge_interface::GenerationDriver;
use tracing::{info, instrument, warn};

/// One generation stage run over batches of items.
///
/// A stage knows how to phrase a prompt for a batch, which reply shape to
/// expect for a batch of a given size, and what an empty result looks like.
pub trait BatchStage {
    /// Input unit
    type Item: Clone;
    /// Result for one input unit
    type Output: Clone;
    /// Reply shape for a whole batch
    type Shape: ExpectedShape<Output = Vec<Self::Output>>;

    /// Stage name for logs.
    fn name(&self) -> &'static str;

    /// Prompt covering every item of `batch`, in order.
    fn prompt(&self, batch: &[Self::Item]) -> String;

    /// Expected reply shape for a batch of `batch_len` items.
    fn shape(&self, batch_len: usize) -> Self::Shape;

    /// Empty result given to an item whose batch fell back.
    fn placeholder(&self) -> Self::Output;
}

/// Runs a [`BatchStage`] over a list of items, one executor call per batch.
///
/// The result list always has one entry per input item, in input order.
#[derive(Debug)]
pub struct BatchOrchestrator<'a, D> {
    executor: &'a StageExecutor<D>,
}

impl<'a, D: GenerationDriver> BatchOrchestrator<'a, D> {
    /// Create an orchestrator sending through `executor`.
    pub fn new(executor: &'a StageExecutor<D>) -> Self {
        Self { executor }
    }

    /// Process `items` in contiguous batches of `batch_size`.
    ///
    /// Returns the per-item results and the `(item, result)` trace, both in
    /// input order. A batch that spends its attempt budget gives each of its
    /// items a fresh placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::InvalidBatchSize`] for a zero batch size,
    /// and propagates credential exhaustion.
    #[instrument(skip(self, stage, items), fields(stage = stage.name(), items = items.len()))]
    pub async fn process<S: BatchStage>(
        &self,
        stage: &S,
        items: &[S::Item],
        batch_size: usize,
    ) -> StepforgeResult<(Vec<S::Output>, Trace<S::Item, S::Output>)> {
        if batch_size == 0 {
            return Err(
                PipelineError::new(PipelineErrorKind::InvalidBatchSize(stage.name().to_string()))
                    .into(),
            );
        }

        let batch_count = items.len().div_ceil(batch_size);
        let mut results = Vec::with_capacity(items.len());
        let mut trace = Vec::with_capacity(items.len());

        for (batch_index, batch) in items.chunks(batch_size).enumerate() {
            info!(
                stage = stage.name(),
                batch = batch_index + 1,
                of = batch_count,
                size = batch.len(),
                "Processing batch"
            );

            let prompt = stage.prompt(batch);
            let shape = stage.shape(batch.len());
            let mut outputs = self
                .executor
                .run(&prompt, &shape, || {
                    batch.iter().map(|_| stage.placeholder()).collect()
                })
                .await?;

            if outputs.len() != batch.len() {
                warn!(
                    batch = batch_index + 1,
                    expected = batch.len(),
                    actual = outputs.len(),
                    "Batch result has wrong length, using placeholders"
                );
                outputs = batch.iter().map(|_| stage.placeholder()).collect();
            }

            for (item, output) in batch.iter().zip(outputs) {
                trace.push((item.clone(), output.clone()));
                results.push(output);
            }
        }

        Ok((results, trace))
    }
}
