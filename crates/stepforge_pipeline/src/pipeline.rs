//! Two-stage generation: decomposition, then step expansion.

use crate::prompts::input_prompt;
use crate::{
    BatchOrchestrator, DecomposeStage, FlatStrings, RetrySettings, StageExecutor, StageReconciler,
    StepStage, sanitize_item,
};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use stepforge_core::{DatasetSplit, Language, StepRecord, StepTrace, SubtaskGroup, TaskTrace};
use stepforge_error::{BuilderError, StepforgeResult};
use stepforge_interface::GenerationDriver;
use stepforge_rate_limit::GenerationConfig;
use tracing::{info, instrument, warn};

/// Batch sizes and input-generation volume.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::PipelineSettings;
///
/// let settings = PipelineSettings::builder()
///     .decompose_batch_size(50_usize)
///     .build()
///     .unwrap();
/// assert_eq!(*settings.decompose_batch_size(), 50);
/// assert_eq!(*settings.step_batch_size(), 20);
/// assert_eq!(*settings.language(), stepforge_core::Language::English);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Getters)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct PipelineSettings {
    /// Raw items per stage-1 batch
    #[builder(default = "20")]
    decompose_batch_size: usize,
    /// Subtasks per stage-2 batch
    #[builder(default = "20")]
    step_batch_size: usize,
    /// Input-generation calls per case
    #[builder(default = "5")]
    input_rounds: usize,
    /// Descriptions requested per input-generation call
    #[builder(default = "20")]
    items_per_round: usize,
    /// Language of descriptions and subtasks
    #[builder(default)]
    language: Language,
}

impl PipelineSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("decompose_batch_size", self.decompose_batch_size),
            ("step_batch_size", self.step_batch_size),
            ("items_per_round", self.items_per_round),
        ];
        match sizes.iter().find(|(_, value)| *value == Some(0)) {
            Some((name, _)) => Err(format!("{} must be at least 1", name)),
            None => Ok(()),
        }
    }
}

impl PipelineSettings {
    /// Creates a new settings builder.
    pub fn builder() -> PipelineSettingsBuilder {
        PipelineSettingsBuilder::default()
    }

    /// Settings taken from the `[generation]` section.
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if a batch size is zero.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, BuilderError> {
        Self::builder()
            .decompose_batch_size(config.decompose_batch_size)
            .step_batch_size(config.step_batch_size)
            .input_rounds(config.input_rounds)
            .items_per_round(config.items_per_round)
            .language(config.language)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))
    }
}

/// Everything one pipeline run produces.
///
/// `task_list` has one group per raw item; `step_groups` mirrors its shape
/// with one step per subtask.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Stage-1 result table
    pub task_list: Vec<SubtaskGroup>,
    /// `(raw item, subtask group)` pairs
    pub task_trace: TaskTrace,
    /// Stage-2 result table, regrouped like `task_list`
    pub step_groups: Vec<Vec<StepRecord>>,
    /// `(subtask, step)` pairs in flat order
    pub step_trace: StepTrace,
}

/// The generation pipeline over one driver.
///
/// Calls are strictly sequential: no batch starts before the previous one has
/// produced a result or fallen back.
#[derive(Debug)]
pub struct Pipeline<D> {
    executor: StageExecutor<D>,
    settings: PipelineSettings,
}

impl<D: GenerationDriver> Pipeline<D> {
    /// Create a pipeline over `driver`.
    pub fn new(driver: D, settings: PipelineSettings, retry: RetrySettings) -> Self {
        Self {
            executor: StageExecutor::new(driver, retry),
            settings,
        }
    }

    /// Create a pipeline configured from the `[generation]` section.
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if the section holds zero sizes or attempts.
    pub fn from_config(driver: D, config: &GenerationConfig) -> StepforgeResult<Self> {
        let settings = PipelineSettings::from_config(config)?;
        let retry = RetrySettings::from_config(config)?;
        Ok(Self::new(driver, settings, retry))
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        self.executor.driver()
    }

    /// Batch and volume settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Stage 1: decompose each raw item into a subtask group.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion.
    #[instrument(skip(self, raw_items), fields(items = raw_items.len()))]
    pub async fn decompose(
        &self,
        raw_items: &[String],
    ) -> StepforgeResult<(Vec<SubtaskGroup>, TaskTrace)> {
        BatchOrchestrator::new(&self.executor)
            .process(
                &DecomposeStage::new(self.settings.language),
                raw_items,
                self.settings.decompose_batch_size,
            )
            .await
    }

    /// Stage 2: one step per subtask, regrouped like `groups`.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion.
    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    pub async fn expand_steps(
        &self,
        groups: &[SubtaskGroup],
    ) -> StepforgeResult<(Vec<Vec<StepRecord>>, StepTrace)> {
        StageReconciler::new(BatchOrchestrator::new(&self.executor))
            .reconcile(
                &StepStage::new(self.settings.language),
                groups,
                self.settings.step_batch_size,
            )
            .await
    }

    /// Run both stages over `raw_items`.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion.
    #[instrument(skip(self, raw_items), fields(items = raw_items.len()))]
    pub async fn run(&self, raw_items: &[String]) -> StepforgeResult<PipelineOutput> {
        let (task_list, task_trace) = self.decompose(raw_items).await?;
        let empty_groups = task_list.iter().filter(|group| group.is_empty()).count();
        info!(
            groups = task_list.len(),
            empty_groups,
            subtasks = task_list.iter().map(Vec::len).sum::<usize>(),
            "Stage 1 complete"
        );

        let (step_groups, step_trace) = self.expand_steps(&task_list).await?;
        let placeholders = step_trace
            .iter()
            .filter(|(_, step)| step.is_placeholder())
            .count();
        info!(steps = step_trace.len(), placeholders, "Stage 2 complete");

        Ok(PipelineOutput {
            task_list,
            task_trace,
            step_groups,
            step_trace,
        })
    }

    /// Generate raw task descriptions for `split`.
    ///
    /// Each round asks for `items_per_round` descriptions; a round whose
    /// replies never match that exact count adds nothing.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion.
    #[instrument(skip(self), fields(rounds = self.settings.input_rounds))]
    pub async fn generate_inputs(&self, split: DatasetSplit) -> StepforgeResult<Vec<String>> {
        let count = self.settings.items_per_round;
        let prompt = input_prompt(split, self.settings.language, count);
        let shape = FlatStrings::new(count);
        let mut items = Vec::with_capacity(self.settings.input_rounds * count);

        for round in 0..self.settings.input_rounds {
            let generated = self.executor.run(&prompt, &shape, Vec::new).await?;
            if generated.is_empty() {
                warn!(round = round + 1, "Input round produced no descriptions");
            }
            for item in &generated {
                items.push(sanitize_item(item)?);
            }
        }

        info!(
            items = items.len(),
            %split,
            language = %self.settings.language,
            "Generated input descriptions"
        );
        Ok(items)
    }
}
