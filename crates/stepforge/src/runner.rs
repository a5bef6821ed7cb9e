//! Multi-case runs: input generation, both stages, export.

use crate::{ExportPaths, Exporter};
use std::path::{Path, PathBuf};
use stepforge_core::DatasetSplit;
use stepforge_error::StepforgeResult;
use stepforge_interface::GenerationDriver;
use stepforge_pipeline::{Pipeline, PipelineOutput, read_input_file, write_input_file};
use stepforge_rate_limit::RunConfig;
use tracing::{error, info, instrument, warn};

/// Outcome of one processed case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Case name, `<base>_<index>`
    pub case: String,
    /// Dataset the case belongs to
    pub split: DatasetSplit,
    /// Raw items read from the input file
    pub raw_items: usize,
    /// Stage-1 groups with no subtasks
    pub empty_groups: usize,
    /// Stage-2 placeholder steps
    pub placeholder_steps: usize,
    /// Exported files
    pub exports: ExportPaths,
}

impl CaseReport {
    fn new(case: &str, split: DatasetSplit, output: &PipelineOutput, exports: ExportPaths) -> Self {
        Self {
            case: case.to_string(),
            split,
            raw_items: output.task_trace.len(),
            empty_groups: output.task_list.iter().filter(|g| g.is_empty()).count(),
            placeholder_steps: output
                .step_trace
                .iter()
                .filter(|(_, step)| step.is_placeholder())
                .count(),
            exports,
        }
    }
}

/// What a multi-case run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Cases that finished, in order
    pub completed: Vec<CaseReport>,
    /// Cases that failed with a recoverable error
    pub failed: Vec<String>,
}

/// Drives cases through a [`Pipeline`] and an [`Exporter`].
#[derive(Debug)]
pub struct CaseRunner<'a, D> {
    pipeline: &'a Pipeline<D>,
    exporter: Exporter,
    input_dir: PathBuf,
    files: usize,
    test_every: usize,
}

impl<'a, D: GenerationDriver> CaseRunner<'a, D> {
    /// Create a runner using the `[run]` settings.
    pub fn new(pipeline: &'a Pipeline<D>, run: &RunConfig) -> Self {
        Self {
            pipeline,
            exporter: Exporter::new(&run.output_dir),
            input_dir: run.input_dir.clone(),
            files: run.files,
            test_every: run.test_every,
        }
    }

    /// Input file location for `case`: `<input_dir>/<split>/<case>.txt`.
    pub fn input_path(&self, case: &str, split: DatasetSplit) -> PathBuf {
        self.input_dir
            .join(split.to_string())
            .join(format!("{}.txt", case))
    }

    /// Generate and write the input file for `case` unless it already exists.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion and storage failures.
    #[instrument(skip(self))]
    pub async fn ensure_input(&self, case: &str, split: DatasetSplit) -> StepforgeResult<PathBuf> {
        let path = self.input_path(case, split);
        if path.exists() {
            info!(path = %path.display(), "Reusing existing input file");
            return Ok(path);
        }

        let items = self.pipeline.generate_inputs(split).await?;
        write_input_file(&path, &items)?;
        info!(path = %path.display(), items = items.len(), "Wrote input file");
        Ok(path)
    }

    /// Run both stages over an input file and export the results as `case`.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion and storage failures.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn process_file(
        &self,
        case: &str,
        split: DatasetSplit,
        path: &Path,
    ) -> StepforgeResult<CaseReport> {
        let raw_items = read_input_file(path)?;
        if raw_items.is_empty() {
            warn!("Input file holds no quoted items");
        }

        let output = self.pipeline.run(&raw_items).await?;
        let exports = self.exporter.export(case, split, &output)?;
        let report = CaseReport::new(case, split, &output, exports);
        info!(
            raw_items = report.raw_items,
            empty_groups = report.empty_groups,
            placeholder_steps = report.placeholder_steps,
            "Case complete"
        );
        Ok(report)
    }

    /// Generate inputs if needed, then process them.
    ///
    /// # Errors
    ///
    /// Propagates credential exhaustion and storage failures.
    pub async fn run_case(&self, case: &str, split: DatasetSplit) -> StepforgeResult<CaseReport> {
        let path = self.ensure_input(case, split).await?;
        self.process_file(case, split, &path).await
    }

    /// Run cases `<name>_0` through `<name>_<files - 1>`.
    ///
    /// Every `test_every`-th case is a test case. A failing case is logged
    /// and skipped unless the failure is credential exhaustion, which ends
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that ended the run.
    #[instrument(skip(self), fields(files = self.files))]
    pub async fn run_all(&self, name: &str) -> StepforgeResult<RunSummary> {
        let mut summary = RunSummary::default();

        for index in 0..self.files {
            let case = format!("{}_{}", name, index);
            let split = DatasetSplit::for_case(index, self.test_every);
            info!(case = %case, %split, "Starting case");

            match self.run_case(&case, split).await {
                Ok(report) => summary.completed.push(report),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!(case = %case, error = %e, "Case failed, continuing");
                    summary.failed.push(case);
                }
            }
        }

        info!(
            completed = summary.completed.len(),
            failed = summary.failed.len(),
            "Run complete"
        );
        Ok(summary)
    }
}
