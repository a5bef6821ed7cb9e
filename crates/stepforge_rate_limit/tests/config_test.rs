//! Tests for the configuration loader and credential pool resolution.

use std::io::Write;
use stepforge_rate_limit::{CredentialsConfig, StepforgeConfig};

fn write_config(contents: &str) -> anyhow::Result<(tempfile::TempDir, std::path::PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("stepforge.toml");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok((dir, path))
}

#[test]
fn test_load_bundled_defaults() -> anyhow::Result<()> {
    let config = StepforgeConfig::load()?;

    assert_eq!(config.generation.rate_limit_code, 429);
    assert_eq!(config.generation.max_attempts, 3);
    assert_eq!(config.generation.decompose_batch_size, 20);
    assert_eq!(config.generation.step_batch_size, 20);
    assert_eq!(config.credentials.env_var, "GEMINI_API_KEYS");
    Ok(())
}

#[test]
fn test_from_file_fills_missing_values() -> anyhow::Result<()> {
    let (_dir, path) = write_config(
        r#"
[generation]
decompose_batch_size = 50

[credentials]
keys = ["alpha", "beta"]
"#,
    )?;

    let config = StepforgeConfig::from_file(&path)?;

    assert_eq!(config.generation.decompose_batch_size, 50);
    assert_eq!(config.generation.step_batch_size, 20);
    assert_eq!(config.generation.model, "gemini-2.5-flash");
    assert_eq!(config.credentials.keys, vec!["alpha", "beta"]);
    assert_eq!(config.run.test_every, 4);
    Ok(())
}

#[test]
fn test_explicit_file_overrides_bundled() -> anyhow::Result<()> {
    let (_dir, path) = write_config(
        r#"
[run]
files = 3
"#,
    )?;

    let config = StepforgeConfig::load_with(Some(&path))?;

    assert_eq!(config.run.files, 3);
    assert_eq!(config.generation.max_attempts, 3);
    Ok(())
}

#[test]
fn test_zero_batch_size_rejected() -> anyhow::Result<()> {
    let (_dir, path) = write_config(
        r#"
[generation]
step_batch_size = 0
"#,
    )?;

    let err = StepforgeConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("generation.step_batch_size"));
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = StepforgeConfig::load_with(Some(std::path::Path::new(
        "/nonexistent/stepforge-config.toml",
    )));
    assert!(result.is_err());
}

#[test]
fn test_merge_keys_concatenates_sources() {
    let configured = vec!["from-file".to_string(), "  ".to_string()];
    let pool = CredentialsConfig::merge_keys(&configured, Some("env-a, env-b,,"));
    assert_eq!(pool, vec!["from-file", "env-a", "env-b"]);
}

#[test]
fn test_empty_pool_is_an_error() {
    let credentials = CredentialsConfig {
        keys: Vec::new(),
        env_var: "STEPFORGE_TEST_UNSET_KEYS_VAR".to_string(),
    };
    assert!(credentials.resolve_pool().is_err());
}

#[test]
fn test_credentials_debug_is_redacted() {
    let credentials = CredentialsConfig {
        keys: vec!["very-secret".to_string()],
        env_var: "GEMINI_API_KEYS".to_string(),
    };
    let rendered = format!("{:?}", credentials);
    assert!(!rendered.contains("very-secret"));
    assert!(rendered.contains("1 redacted"));
}

#[test]
fn test_language_setting() -> anyhow::Result<()> {
    let (_dir, path) = write_config(
        r#"
[generation]
language = "vi"
"#,
    )?;

    let config = StepforgeConfig::from_file(&path)?;
    assert_eq!(config.generation.language, stepforge_core::Language::Vietnamese);
    assert_eq!(
        StepforgeConfig::load()?.generation.language,
        stepforge_core::Language::English
    );
    Ok(())
}
