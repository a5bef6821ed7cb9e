//! JSON export of per-case pipeline results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stepforge_core::{DatasetSplit, StepRecord};
use stepforge_error::{JsonError, StepforgeResult, StorageError};
use stepforge_pipeline::PipelineOutput;
use tracing::{debug, instrument};

/// One raw task with its subtasks and their steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Dataset the case belongs to
    pub split: DatasetSplit,
    /// The raw task description
    pub main_task: String,
    /// Stage-1 subtasks of `main_task`
    pub sub_tasks: Vec<String>,
    /// Stage-2 steps, one per subtask
    pub steps: Vec<StepRecord>,
}

/// Zip the stage-1 trace with the regrouped steps.
///
/// A trace entry with no matching step group exports an empty step list.
pub fn summary_rows(split: DatasetSplit, output: &PipelineOutput) -> Vec<SummaryRow> {
    output
        .task_trace
        .iter()
        .enumerate()
        .map(|(index, (main_task, sub_tasks))| SummaryRow {
            split,
            main_task: main_task.clone(),
            sub_tasks: sub_tasks.clone(),
            steps: output.step_groups.get(index).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Files written for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Stage-1 table
    pub task: PathBuf,
    /// Regrouped stage-2 table
    pub step: PathBuf,
    /// Summary rows
    pub summary: PathBuf,
}

/// Writes case results under an output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Create an exporter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the files for `case` go.
    pub fn paths(&self, case: &str) -> ExportPaths {
        ExportPaths {
            task: self.output_dir.join(format!("{}.task.json", case)),
            step: self.output_dir.join(format!("{}.step.json", case)),
            summary: self.output_dir.join(format!("{}.summary.json", case)),
        }
    }

    /// Write the task table, step table and summary for `case`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory or a file cannot be
    /// written.
    #[instrument(skip(self, output), fields(output_dir = %self.output_dir.display()))]
    pub fn export(
        &self,
        case: &str,
        split: DatasetSplit,
        output: &PipelineOutput,
    ) -> StepforgeResult<ExportPaths> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| StorageError::directory(&self.output_dir, &e))?;

        let paths = self.paths(case);
        write_json(&paths.task, &output.task_list)?;
        write_json(&paths.step, &output.step_groups)?;
        write_json(&paths.summary, &summary_rows(split, output))?;

        debug!(rows = output.task_trace.len(), "Exported case");
        Ok(paths)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StepforgeResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(e.to_string(), path.display().to_string()))?;
    std::fs::write(path, text).map_err(|e| StorageError::write(path, &e))?;
    Ok(())
}
