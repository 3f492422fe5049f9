//! Generative-language service integration.
//!
//! The orchestrator and the mentor chat talk to the provider through the
//! [`GenerativeService`] trait; [`GeminiClient`] is the HTTP implementation.

pub mod gemini;
pub mod mentor;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mentor::{ChatMessage, ChatTranscript, MentorChat};

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Provider-defined sampling controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// Failures talking to the generative-language service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("cannot connect to {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no text")]
    EmptyResponse,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, ServiceError>;

    /// Model identifier, for logs and reports.
    fn model_name(&self) -> &str;
}
