//! Test utilities for pipeline tests.
//!
//! [`ScriptedDriver`] replays outcomes in order; [`FnDriver`] answers each
//! prompt with a closure. Both report credential exhaustion once they have
//! nothing left to say, so a runaway resend loop ends instead of hanging.

#![allow(dead_code)]

pub mod drivers;
pub mod transport;

#[allow(unused_imports)]
pub use drivers::{FnDriver, ScriptedDriver, exhausted};
#[allow(unused_imports)]
pub use transport::{ScriptedReply, ScriptedTransport};

use regex::Regex;

/// Items a stage prompt enumerates as `N. "text"` lines, in order.
///
/// Only the list after the final `Requirements:` or `Instructions:` header
/// counts, so worked examples earlier in the prompt are skipped.
pub fn enumerated_items(prompt: &str) -> Vec<String> {
    let list = prompt
        .rsplit_once("Requirements:\n")
        .or_else(|| prompt.rsplit_once("Instructions:\n"))
        .map(|(_, rest)| rest)
        .unwrap_or(prompt);
    let re = Regex::new(r#"(?m)^\d+\. "(.*)"$"#).unwrap();
    re.captures_iter(list)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Gemini reply body carrying one candidate with `text`.
pub fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
    .to_string()
}

/// Gemini reply body carrying an error object with `code`.
pub fn error_body(code: u16) -> String {
    serde_json::json!({"error": {"code": code, "message": "scripted error"}}).to_string()
}
