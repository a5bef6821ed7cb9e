//! The two batch stages: task decomposition and step expansion.

use crate::prompts::{decompose_prompt, steps_prompt};
use crate::{BatchStage, NestedStrings, StepObjects};
use stepforge_core::{Language, StepRecord, SubtaskGroup};

/// Stage 1: split each raw task description into atomic subtasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecomposeStage {
    language: Language,
}

impl DecomposeStage {
    /// Decomposition of descriptions written in `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl BatchStage for DecomposeStage {
    type Item = String;
    type Output = SubtaskGroup;
    type Shape = NestedStrings;

    fn name(&self) -> &'static str {
        "decompose"
    }

    fn prompt(&self, batch: &[String]) -> String {
        decompose_prompt(batch, self.language)
    }

    fn shape(&self, batch_len: usize) -> NestedStrings {
        NestedStrings::new(batch_len)
    }

    fn placeholder(&self) -> SubtaskGroup {
        SubtaskGroup::new()
    }
}

/// Stage 2: turn each subtask into one executable step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepStage {
    language: Language,
}

impl StepStage {
    /// Step expansion of subtasks written in `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl BatchStage for StepStage {
    type Item = String;
    type Output = StepRecord;
    type Shape = StepObjects;

    fn name(&self) -> &'static str {
        "steps"
    }

    fn prompt(&self, batch: &[String]) -> String {
        steps_prompt(batch, self.language)
    }

    fn shape(&self, batch_len: usize) -> StepObjects {
        StepObjects::new(batch_len)
    }

    fn placeholder(&self) -> StepRecord {
        StepRecord::placeholder()
    }
}
