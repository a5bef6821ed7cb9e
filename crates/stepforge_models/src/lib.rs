//! Generation service clients for Stepforge.
//!
//! [`GeminiClient`] speaks the Gemini `generateContent` REST endpoint and
//! classifies every reply as a [`GenerationOutcome`](stepforge_interface::GenerationOutcome),
//! rotating credentials on failure. The wire is abstracted behind
//! [`Transport`] so tests can script replies without a network.
//!
//! # Example
//!
//! ```no_run
//! use stepforge_interface::GenerationDriver;
//! use stepforge_models::GeminiClient;
//! use stepforge_rate_limit::StepforgeConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StepforgeConfig::load()?;
//! let pool = config.credentials.resolve_pool()?;
//! let client = GeminiClient::from_config(&config.generation, pool)?;
//! let outcome = client.send("Reply with [] and nothing else").await?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    ApiErrorBody, Candidate, CandidateContent, Content, GeminiClient, GenerateContentRequest,
    GenerateContentResponse, Part, ReqwestTransport, ResponsePart, Transport, TransportRequest,
    TransportResponse, UsageMetadata,
};
