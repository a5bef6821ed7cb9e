//! Core data types for the Stepforge generation pipeline.
//!
//! This crate holds the records the two generation stages produce and the
//! trace pairs the exporter consumes. Everything here lives for one run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fence;
mod language;
mod split;
mod step;
mod trace;

pub use fence::strip_code_fence;
pub use language::Language;
pub use split::DatasetSplit;
pub use step::StepRecord;
pub use trace::{StepTrace, SubtaskGroup, TaskTrace, Trace};
