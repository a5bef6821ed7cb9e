//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stepforge::{DatasetSplit, Language};

/// Stepforge - synthetic UI test data through a rate-limited generation service
#[derive(Parser, Debug)]
#[command(name = "stepforge")]
#[command(about = "Generate UI test cases and executable steps with credential rotation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate inputs and run both stages for every case
    Run {
        /// Base name; cases are named `<name>_<index>`
        #[arg(long)]
        name: String,

        /// Language of generated descriptions (en or vi), overriding the config
        #[arg(long)]
        language: Option<Language>,
    },

    /// Generate one input file
    GenerateInput {
        /// Case name
        #[arg(long)]
        name: String,

        /// Dataset split selecting the prompt variant
        #[arg(long, default_value = "train")]
        split: DatasetSplit,

        /// Language of generated descriptions (en or vi), overriding the config
        #[arg(long)]
        language: Option<Language>,
    },

    /// Run both stages over an existing input file
    Process {
        /// Input file of double-quoted descriptions
        #[arg(long)]
        input: PathBuf,

        /// Split recorded on the summary rows
        #[arg(long, default_value = "train")]
        split: DatasetSplit,

        /// Language the input file is written in (en or vi), overriding the config
        #[arg(long)]
        language: Option<Language>,
    },
}

impl Commands {
    /// Language override given on the command line.
    pub fn language(&self) -> Option<Language> {
        match self {
            Commands::Run { language, .. }
            | Commands::GenerateInput { language, .. }
            | Commands::Process { language, .. } => *language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = Cli::try_parse_from(["stepforge", "run", "--name", "en", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Run { ref name, .. } if name == "en"));
        assert_eq!(cli.command.language(), None);
    }

    #[test]
    fn test_parse_generate_input_split() {
        let cli = Cli::try_parse_from([
            "stepforge",
            "--config",
            "custom.toml",
            "generate-input",
            "--name",
            "en_3",
            "--split",
            "test",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::GenerateInput { split: DatasetSplit::Test, .. }
        ));
    }

    #[test]
    fn test_process_defaults_to_train() {
        let cli = Cli::try_parse_from(["stepforge", "process", "--input", "a.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Process { split: DatasetSplit::Train, .. }
        ));
    }

    #[test]
    fn test_unknown_split_is_rejected() {
        assert!(
            Cli::try_parse_from(["stepforge", "generate-input", "--name", "x", "--split", "dev"])
                .is_err()
        );
    }

    #[test]
    fn test_language_override() {
        let cli = Cli::try_parse_from([
            "stepforge",
            "generate-input",
            "--name",
            "vi_0",
            "--language",
            "vi",
        ])
        .unwrap();
        assert_eq!(cli.command.language(), Some(Language::Vietnamese));

        let run = Cli::try_parse_from(["stepforge", "run", "--name", "vi", "--language", "vi"])
            .unwrap();
        assert_eq!(run.command.language(), Some(Language::Vietnamese));

        assert!(
            Cli::try_parse_from(["stepforge", "run", "--name", "x", "--language", "fr"]).is_err()
        );
    }
}
