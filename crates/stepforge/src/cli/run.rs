//! Command handlers.

use super::Commands;
use std::path::Path;
use stepforge::{
    CaseRunner, GeminiClient, Pipeline, StepforgeConfig, StepforgeResult, write_input_file,
};
use tracing::info;

/// Execute `command` with settings from `config_path` layered over the
/// defaults.
///
/// # Errors
///
/// Configuration errors, storage errors and credential exhaustion.
pub async fn execute(command: Commands, config_path: Option<&Path>) -> StepforgeResult<()> {
    let mut config = StepforgeConfig::load_with(config_path)?;
    if let Some(language) = command.language() {
        config.generation.language = language;
    }
    let pool = config.credentials.resolve_pool()?;
    let client = GeminiClient::from_config(&config.generation, pool)?;
    let pipeline = Pipeline::from_config(client, &config.generation)?;
    let runner = CaseRunner::new(&pipeline, &config.run);

    match command {
        Commands::Run { name, .. } => {
            let summary = runner.run_all(&name).await?;
            info!(
                completed = summary.completed.len(),
                failed = summary.failed.len(),
                "Finished run"
            );
        }

        Commands::GenerateInput { name, split, .. } => {
            let items = pipeline.generate_inputs(split).await?;
            let path = runner.input_path(&name, split);
            write_input_file(&path, &items)?;
            info!(path = %path.display(), items = items.len(), "Generated input");
        }

        Commands::Process { input, split, .. } => {
            let case = input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "case".to_string());
            let report = runner.process_file(&case, split, &input).await?;
            info!(
                summary = %report.exports.summary.display(),
                placeholder_steps = report.placeholder_steps,
                "Processed input"
            );
        }
    }

    Ok(())
}
