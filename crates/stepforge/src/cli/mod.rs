//! Command-line interface for the stepforge binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::execute;
