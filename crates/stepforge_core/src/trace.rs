//! Result groups and audit traces.

use crate::StepRecord;

/// Ordered subtasks decomposed from one raw task description.
///
/// Empty when the batch holding the description fell back to placeholders.
pub type SubtaskGroup = Vec<String>;

/// Ordered `(input, result)` pairs in processing order.
pub type Trace<T, R> = Vec<(T, R)>;

/// Raw task description paired with its subtask group.
pub type TaskTrace = Trace<String, SubtaskGroup>;

/// Subtask paired with the step generated for it.
pub type StepTrace = Trace<String, StepRecord>;
