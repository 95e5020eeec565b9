//! LLM client abstraction and request/response types.
//!
//! This module defines the core abstractions for the two hosted model
//! operations used by the pipeline: completion and relevance scoring.

use memex_core::AppResult;
use serde::{Deserialize, Serialize};

/// LLM completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g., "mistral-large2")
    pub model: String,

    /// The prompt text to send to the model
    pub prompt: String,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a new completion request with required fields.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text. Empty when the endpoint produced no result.
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

impl CompletionResponse {
    /// True when the endpoint returned no usable text.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Trait for hosted LLM endpoints.
///
/// This trait abstracts the platform's model-serving surface and provides a
/// unified interface for text completion and query/passage relevance
/// scoring. Implementations perform a single synchronous call per
/// invocation; retry and degradation policy belongs to the callers.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "cortex", "mock").
    fn provider_name(&self) -> &str;

    /// Perform a single completion call.
    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse>;

    /// Score the relevance of `passage` to `query`.
    ///
    /// # Returns
    /// A score in `[0.0, 1.0]`, higher meaning more relevant.
    async fn score(&self, query: &str, passage: &str) -> AppResult<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("mistral-large2", "Hello")
            .with_temperature(0.3)
            .with_max_tokens(512);

        assert_eq!(request.model, "mistral-large2");
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.max_tokens, Some(512));
    }

    #[test]
    fn test_request_serialization_skips_unset_fields() {
        let request = CompletionRequest::new("mistral-large2", "Hello");
        let json = serde_json::to_string(&request).unwrap();

        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_response_is_empty() {
        let empty = CompletionResponse {
            content: "  \n".to_string(),
            model: "mistral-large2".to_string(),
        };
        assert!(empty.is_empty());

        let full = CompletionResponse {
            content: "An answer".to_string(),
            model: "mistral-large2".to_string(),
        };
        assert!(!full.is_empty());
    }
}
