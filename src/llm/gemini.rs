//! Gemini `generateContent` client.
//!
//! Sends a single text prompt with sampling options and extracts the text
//! of the first candidate from the response.

use super::{GenerationConfig, GenerativeService, ServiceError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ServiceError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, ServiceError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: generation,
        };

        debug!(
            "Sending generateContent request to model {} ({} prompt chars)",
            self.config.model,
            prompt.len()
        );

        let response = self
            .http_client
            .post(self.config.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose_secret().as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout(self.config.timeout)
                } else if e.is_connect() {
                    ServiceError::Connect(self.config.base_url.clone())
                } else {
                    ServiceError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Pull the first candidate's text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, ServiceError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::MalformedPayload(format!("response envelope: {}", e)))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ServiceError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let config = GeminiConfig::new("key").with_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let config = GeminiConfig::new("super-secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn test_request_serialization() {
        let generation = GenerationConfig {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 200,
        };
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: &generation,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 200);
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Hi there");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        assert!(matches!(
            extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(ServiceError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            Err(ServiceError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_malformed() {
        assert!(matches!(
            extract_text("<html>Bad Gateway</html>"),
            Err(ServiceError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_client_builds() {
        let client = GeminiClient::new(GeminiConfig::new("k").with_model("gemini-1.5-flash"));
        assert_eq!(client.unwrap().model_name(), "gemini-1.5-flash");
    }
}
