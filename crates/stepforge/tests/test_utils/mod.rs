//! Test utilities for runner and exporter tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use stepforge::{
    CredentialError, CredentialErrorKind, GenerationDriver, GenerationOutcome, RunConfig,
    StepforgeResult,
};
use std::path::Path;

/// Offline stand-in for the generation service.
///
/// Input prompts get `items_per_round` descriptions, decomposition prompts
/// get two subtasks per requirement and step prompts one `click` step per
/// instruction. Prompts containing `poison` always get an unusable reply.
/// After `budget` calls every call reports credential exhaustion.
pub struct OfflineDriver {
    budget: usize,
    calls: Mutex<usize>,
}

impl OfflineDriver {
    pub fn new() -> Self {
        Self::with_budget(usize::MAX)
    }

    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

fn listed_items(prompt: &str) -> Vec<String> {
    let list = prompt
        .rsplit_once("Requirements:\n")
        .or_else(|| prompt.rsplit_once("Instructions:\n"))
        .map(|(_, rest)| rest)
        .unwrap_or("");
    list.lines()
        .filter_map(|line| line.split_once(". \""))
        .map(|(_, rest)| rest.trim_end_matches('"').to_string())
        .collect()
}

fn requested_count(prompt: &str) -> usize {
    prompt
        .split_once("Generate exactly ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .and_then(|count| count.parse().ok())
        .unwrap_or(0)
}

#[async_trait]
impl GenerationDriver for OfflineDriver {
    async fn send(&self, prompt: &str) -> StepforgeResult<GenerationOutcome> {
        {
            let mut calls = self.calls.lock().unwrap();
            if *calls >= self.budget {
                return Err(
                    CredentialError::new(CredentialErrorKind::Exhausted { pool_size: 1 }).into(),
                );
            }
            *calls += 1;
        }

        if prompt.contains("poison") {
            return Ok(GenerationOutcome::Success("no".to_string()));
        }

        let reply = if prompt.contains("step objects") {
            json!(listed_items(prompt)
                .iter()
                .map(|item| json!({"action": "click", "selector": item, "value": "", "expected": {"status": "ok"}}))
                .collect::<Vec<_>>())
        } else if prompt.contains("Requirements:\n") {
            json!(listed_items(prompt)
                .iter()
                .map(|item| vec![format!("open {}", item), format!("verify {}", item)])
                .collect::<Vec<_>>())
        } else {
            json!((0..requested_count(prompt))
                .map(|i| format!("Click the \"Item {}\" link", i))
                .collect::<Vec<_>>())
        };
        Ok(GenerationOutcome::Success(reply.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }

    fn model_name(&self) -> &str {
        "offline-model"
    }
}

/// `[run]` settings rooted in `dir`.
pub fn run_config(dir: &Path, files: usize, test_every: usize) -> RunConfig {
    RunConfig {
        files,
        test_every,
        input_dir: dir.join("input"),
        output_dir: dir.join("output"),
    }
}
