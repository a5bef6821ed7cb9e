//! Carrying stage-1 groups through a flat stage-2 pass and back.

use crate::{BatchOrchestrator, BatchStage};
use stepforge_core::Trace;
use stepforge_error::{PipelineError, PipelineErrorKind, StepforgeResult};
use stepforge_interface::GenerationDriver;
use tracing::{debug, instrument};

/// Flatten `groups` in order, returning the flat list and each group's length.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::flatten_groups;
///
/// let groups = vec![vec!["a", "b"], vec![], vec!["c"]];
/// let (flat, lengths) = flatten_groups(&groups);
/// assert_eq!(flat, vec!["a", "b", "c"]);
/// assert_eq!(lengths, vec![2, 0, 1]);
/// ```
pub fn flatten_groups<T: Clone>(groups: &[Vec<T>]) -> (Vec<T>, Vec<usize>) {
    let lengths = groups.iter().map(Vec::len).collect();
    let flat = groups.iter().flatten().cloned().collect();
    (flat, lengths)
}

/// Slice `flat` into consecutive chunks of `lengths`, in order.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::Reconstruction`] when the lengths do not sum
/// to `flat.len()`.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::regroup;
///
/// let groups = regroup(vec![1, 2, 3, 4, 5], &[2, 0, 3]).unwrap();
/// assert_eq!(groups, vec![vec![1, 2], vec![], vec![3, 4, 5]]);
/// ```
pub fn regroup<R>(flat: Vec<R>, lengths: &[usize]) -> StepforgeResult<Vec<Vec<R>>> {
    let expected: usize = lengths.iter().sum();
    if expected != flat.len() {
        return Err(PipelineError::new(PipelineErrorKind::Reconstruction {
            results: flat.len(),
            expected,
        })
        .into());
    }

    let mut remaining = flat.into_iter();
    Ok(lengths
        .iter()
        .map(|&len| remaining.by_ref().take(len).collect())
        .collect())
}

/// Runs a per-subtask stage over stage-1 groups, preserving their shape.
///
/// The groups are flattened, processed in batches sized independently of
/// stage 1, and sliced back into groups of the original lengths.
#[derive(Debug)]
pub struct StageReconciler<'a, D> {
    orchestrator: BatchOrchestrator<'a, D>,
}

impl<'a, D: GenerationDriver> StageReconciler<'a, D> {
    /// Create a reconciler processing through `orchestrator`.
    pub fn new(orchestrator: BatchOrchestrator<'a, D>) -> Self {
        Self { orchestrator }
    }

    /// Process every subtask of `groups` with `stage` and regroup the results.
    ///
    /// Returns the regrouped table and the flat `(subtask, result)` trace.
    ///
    /// # Errors
    ///
    /// Propagates batch-size and credential errors from the orchestrator.
    #[instrument(skip(self, stage, groups), fields(stage = stage.name(), groups = groups.len()))]
    pub async fn reconcile<S>(
        &self,
        stage: &S,
        groups: &[Vec<String>],
        batch_size: usize,
    ) -> StepforgeResult<(Vec<Vec<S::Output>>, Trace<String, S::Output>)>
    where
        S: BatchStage<Item = String>,
    {
        let (flat, lengths) = flatten_groups(groups);
        debug!(subtasks = flat.len(), "Flattened stage-1 groups");

        let (results, trace) = self.orchestrator.process(stage, &flat, batch_size).await?;
        let table = regroup(results, &lengths)?;

        Ok((table, trace))
    }
}
