//! Test utilities for Gemini client tests.
//!
//! [`ScriptedTransport`] replays canned reply bodies and records which
//! credential each request carried.

pub mod scripted_transport;

#[allow(unused_imports)]
pub use scripted_transport::{ScriptedReply, ScriptedTransport};

use stepforge_rate_limit::GenerationConfig;

/// Reply body carrying one candidate with `text`.
pub fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
    })
    .to_string()
}

/// Reply body carrying an error object with `code`.
pub fn error_body(code: u16, message: &str) -> String {
    serde_json::json!({"error": {"code": code, "message": message}}).to_string()
}

/// Default generation settings pointed at a fake endpoint.
pub fn test_config() -> GenerationConfig {
    GenerationConfig {
        endpoint: "http://localhost.invalid/v1beta".to_string(),
        ..GenerationConfig::default()
    }
}
