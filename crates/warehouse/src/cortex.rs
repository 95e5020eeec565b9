//! Hosted LLM client over the warehouse's model-serving endpoints.
//!
//! Completion and relevance scoring are both served by the platform; this
//! client adapts them to the `LlmClient` trait from `memex-llm`.

use crate::session::WarehouseSession;
use memex_core::{AppError, AppResult};
use memex_llm::{CompletionRequest, CompletionResponse, LlmClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Completion request in the platform's wire format.
#[derive(Debug, Serialize)]
struct CortexCompleteRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Completion response in the platform's wire format.
///
/// `response` is absent when the model produced nothing; callers decide
/// what an empty completion means.
#[derive(Debug, Deserialize)]
struct CortexCompleteResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct CortexScoreRequest<'a> {
    query: &'a str,
    passage: &'a str,
}

#[derive(Debug, Deserialize)]
struct CortexScoreResponse {
    score: f32,
}

/// LLM client backed by the warehouse's hosted endpoints.
pub struct CortexClient {
    session: Arc<WarehouseSession>,
}

impl CortexClient {
    /// Create a client over an established session.
    pub fn new(session: Arc<WarehouseSession>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl LlmClient for CortexClient {
    fn provider_name(&self) -> &str {
        "cortex"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
        tracing::debug!("Sending completion request (model: {})", request.model);

        let wire_request = CortexCompleteRequest {
            model: &request.model,
            prompt: &request.prompt,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let wire_response: CortexCompleteResponse = self
            .session
            .post_json("/api/v1/cortex/complete", &wire_request)
            .await
            .map_err(AppError::Llm)?;

        Ok(CompletionResponse {
            content: wire_response.response.unwrap_or_default(),
            model: wire_response.model.unwrap_or_else(|| request.model.clone()),
        })
    }

    async fn score(&self, query: &str, passage: &str) -> AppResult<f32> {
        let wire_request = CortexScoreRequest { query, passage };

        let wire_response: CortexScoreResponse = self
            .session
            .post_json("/api/v1/cortex/score", &wire_request)
            .await
            .map_err(AppError::Llm)?;

        // The contract is [0, 1]; clamp rather than trust the endpoint
        Ok(wire_response.score.clamp(0.0, 1.0))
    }
}
