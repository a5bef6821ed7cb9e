//! Trait definitions for the Stepforge generation pipeline.
//!
//! This crate provides the seam between the pipeline, which only needs
//! "send a prompt, get a classified outcome", and the concrete model clients.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::GenerationDriver;
pub use types::GenerationOutcome;
