//! Scriptable mock LLM provider.
//!
//! Used by the pipeline tests and for offline development. Completions and
//! relevance scores are served from queues of canned values, falling back
//! to configurable defaults once a queue is drained. Every call is
//! recorded so tests can assert on the exact prompts sent to the model.

use crate::client::{CompletionRequest, CompletionResponse, LlmClient};
use memex_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<String>,
    scores: VecDeque<f32>,
    requests: Vec<CompletionRequest>,
    score_calls: Vec<(String, String)>,
}

/// Mock provider serving canned completions and scores.
#[derive(Debug)]
pub struct MockLlm {
    state: Mutex<MockState>,
    default_response: String,
    default_score: f32,
    fail_completions: bool,
    fail_scoring: bool,
}

impl MockLlm {
    /// Create a mock that echoes a fixed default response and scores
    /// everything as fully relevant.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            default_response: "mock response".to_string(),
            default_score: 1.0,
            fail_completions: false,
            fail_scoring: false,
        }
    }

    /// Set the response returned once the canned queue is drained.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Set the score returned once the canned queue is drained.
    pub fn with_default_score(mut self, score: f32) -> Self {
        self.default_score = score;
        self
    }

    /// Make every completion call fail.
    pub fn with_failing_completions(mut self) -> Self {
        self.fail_completions = true;
        self
    }

    /// Make every scoring call fail.
    pub fn with_failing_scoring(mut self) -> Self {
        self.fail_scoring = true;
        self
    }

    /// Queue a canned completion (served FIFO).
    pub fn push_response(&self, response: impl Into<String>) {
        self.state.lock().unwrap().responses.push_back(response.into());
    }

    /// Queue a canned relevance score (served FIFO).
    pub fn push_score(&self, score: f32) {
        self.state.lock().unwrap().scores.push_back(score);
    }

    /// All completion requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// All (query, passage) scoring calls received so far.
    pub fn score_calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().score_calls.clone()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlm {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<CompletionResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if self.fail_completions {
            return Err(AppError::Llm("mock completion failure".to_string()));
        }

        let content = state
            .responses
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
        })
    }

    async fn score(&self, query: &str, passage: &str) -> AppResult<f32> {
        let mut state = self.state.lock().unwrap();
        state
            .score_calls
            .push((query.to_string(), passage.to_string()));

        if self.fail_scoring {
            return Err(AppError::Llm("mock scoring failure".to_string()));
        }

        Ok(state.scores.pop_front().unwrap_or(self.default_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let mock = MockLlm::new().with_default_response("hello");
        let response = mock
            .complete(&CompletionRequest::new("m", "prompt"))
            .await
            .unwrap();
        assert_eq!(response.content, "hello");
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_canned_responses_served_in_order() {
        let mock = MockLlm::new();
        mock.push_response("first");
        mock.push_response("second");

        let request = CompletionRequest::new("m", "prompt");
        assert_eq!(mock.complete(&request).await.unwrap().content, "first");
        assert_eq!(mock.complete(&request).await.unwrap().content, "second");
        // Queue drained, default takes over
        assert_eq!(
            mock.complete(&request).await.unwrap().content,
            "mock response"
        );
    }

    #[tokio::test]
    async fn test_failing_completions() {
        let mock = MockLlm::new().with_failing_completions();
        let result = mock.complete(&CompletionRequest::new("m", "prompt")).await;
        assert!(result.is_err());
        // The failed call is still recorded
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_scores() {
        let mock = MockLlm::new().with_default_score(0.25);
        mock.push_score(0.8);

        assert_eq!(mock.score("q", "p1").await.unwrap(), 0.8);
        assert_eq!(mock.score("q", "p2").await.unwrap(), 0.25);
        assert_eq!(mock.score_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_scoring() {
        let mock = MockLlm::new().with_failing_scoring();
        assert!(mock.score("q", "p").await.is_err());
    }
}
