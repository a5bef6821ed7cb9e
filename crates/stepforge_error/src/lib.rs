//! Error types for the Stepforge library.
//!
//! This crate provides the foundation error types used throughout the Stepforge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Only [`CredentialErrorKind::Exhausted`] is meant to end a run. Every other
//! error is absorbed by the pipeline and turned into a retry or a placeholder.
//!
//! # Examples
//!
//! ```
//! use stepforge_error::{StepforgeResult, HttpError};
//!
//! fn fetch_data() -> StepforgeResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod credential;
mod error;
mod gemini;
mod http;
mod json;
mod pipeline;
mod shape;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use credential::{CredentialError, CredentialErrorKind};
pub use error::{StepforgeError, StepforgeErrorKind, StepforgeResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use shape::{ShapeError, ShapeErrorKind};
pub use storage::{StorageError, StorageErrorKind};
