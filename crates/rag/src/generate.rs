//! Answer generation via the hosted completion endpoint.
//!
//! One call, no retries. The generator never propagates an error: an empty
//! completion becomes a literal fallback string and an endpoint failure
//! becomes a user-visible apology, so the interactive surface always has
//! something to show.

use memex_llm::{CompletionRequest, LlmClient};
use std::sync::Arc;

/// Returned when the endpoint completes but produces no text.
pub const FALLBACK_ANSWER: &str = "No response generated.";

/// Returned when the completion endpoint fails outright.
pub const ERROR_ANSWER: &str =
    "I'm sorry, I couldn't reach my memory service just now. Please try again in a moment.";

/// Generates the final answer from an assembled prompt.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Generate an answer. Always returns a non-empty string.
    pub async fn generate(&self, prompt: &str) -> String {
        let request = CompletionRequest::new(&self.model, prompt);

        match self.llm.complete(&request).await {
            Ok(response) if !response.is_empty() => response.content,
            Ok(_) => {
                tracing::warn!("Completion endpoint returned no text");
                FALLBACK_ANSWER.to_string()
            }
            Err(e) => {
                tracing::error!("Answer generation failed: {}", e);
                ERROR_ANSWER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memex_llm::MockLlm;

    #[tokio::test]
    async fn test_generate_returns_completion_verbatim() {
        let mock = Arc::new(MockLlm::new());
        mock.push_response("You had coffee with Sam.");

        let generator = AnswerGenerator::new(mock.clone(), "mistral-large2");
        let answer = generator.generate("prompt text").await;

        assert_eq!(answer, "You had coffee with Sam.");
        assert_eq!(mock.requests()[0].prompt, "prompt text");
        assert_eq!(mock.requests()[0].model, "mistral-large2");
    }

    #[tokio::test]
    async fn test_empty_completion_yields_fallback() {
        let mock = Arc::new(MockLlm::new().with_default_response(""));

        let generator = AnswerGenerator::new(mock, "mistral-large2");
        assert_eq!(generator.generate("prompt").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_endpoint_failure_yields_apology() {
        let mock = Arc::new(MockLlm::new().with_failing_completions());

        let generator = AnswerGenerator::new(mock, "mistral-large2");
        let answer = generator.generate("prompt").await;

        assert_eq!(answer, ERROR_ANSWER);
        assert!(!answer.is_empty());
    }
}
