//! Mock generation drivers.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use stepforge_error::{CredentialError, CredentialErrorKind, StepforgeError, StepforgeResult};
use stepforge_interface::{GenerationDriver, GenerationOutcome};

/// The fatal error a driver returns when no credential is left.
pub fn exhausted() -> StepforgeError {
    CredentialError::new(CredentialErrorKind::Exhausted { pool_size: 1 }).into()
}

/// Replays a fixed sequence of outcomes.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<GenerationOutcome>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedDriver {
    /// Create a driver replaying `script` in order.
    pub fn new(script: Vec<GenerationOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in order.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Outcomes not yet replayed.
    #[allow(dead_code)]
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn send(&self, prompt: &str) -> StepforgeResult<GenerationOutcome> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script.lock().unwrap().pop_front().ok_or_else(exhausted)
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Answers each prompt with a closure, up to a call limit.
pub struct FnDriver<F> {
    respond: F,
    limit: usize,
    prompts: Mutex<Vec<String>>,
}

impl<F> FnDriver<F>
where
    F: Fn(&str) -> GenerationOutcome + Send + Sync,
{
    /// Create a driver answering with `respond`, at most 1000 times.
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            limit: 1000,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls made so far.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in order.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> GenerationDriver for FnDriver<F>
where
    F: Fn(&str) -> GenerationOutcome + Send + Sync,
{
    async fn send(&self, prompt: &str) -> StepforgeResult<GenerationOutcome> {
        let mut prompts = self.prompts.lock().unwrap();
        if prompts.len() >= self.limit {
            return Err(exhausted());
        }
        prompts.push(prompt.to_string());
        drop(prompts);
        Ok((self.respond)(prompt))
    }

    fn provider_name(&self) -> &'static str {
        "fn"
    }

    fn model_name(&self) -> &str {
        "fn-model"
    }
}
