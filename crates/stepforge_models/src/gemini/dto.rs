//! Gemini REST wire types.
//!
//! Only the fields the client reads are modeled. Unknown fields are ignored,
//! so new response fields never break parsing.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One text part of a request turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Part {
    /// Prompt text
    text: String,
}

/// A single request turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Content {
    /// Ordered parts of the turn
    parts: Vec<Part>,
}

/// Body of a `generateContent` call: `{"contents":[{"parts":[{"text": ...}]}]}`.
///
/// # Examples
///
/// ```
/// use stepforge_models::GenerateContentRequest;
///
/// let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi")).unwrap();
/// assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerateContentRequest {
    /// Request turns
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// One text part of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ResponsePart {
    /// Generated text, absent for non-text parts
    #[serde(default)]
    text: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CandidateContent {
    /// Generated parts
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content, absent when generation was blocked
    #[serde(default)]
    content: Option<CandidateContent>,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting returned with successful replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt
    #[serde(default)]
    prompt_token_count: Option<u64>,
    /// Tokens across all candidates
    #[serde(default)]
    candidates_token_count: Option<u64>,
    /// Prompt plus candidate tokens
    #[serde(default)]
    total_token_count: Option<u64>,
}

/// Error object embedded in a failed reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApiErrorBody {
    /// Numeric status code (429 for rate limiting)
    #[serde(default)]
    code: Option<i64>,
    /// Human-readable message
    #[serde(default)]
    message: String,
    /// Canonical status name (e.g., "RESOURCE_EXHAUSTED")
    #[serde(default)]
    status: Option<String>,
}

/// Reply envelope of a `generateContent` call.
///
/// A reply is a success when `candidates` is present, and a failure when it
/// carries `error` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    /// Token accounting
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    /// Error object
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
