//! Gemini `generateContent` client.

mod client;
mod dto;
mod transport;

pub use client::GeminiClient;
pub use dto::{
    ApiErrorBody, Candidate, CandidateContent, Content, GenerateContentRequest,
    GenerateContentResponse, Part, ResponsePart, UsageMetadata,
};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
