//! Date normalization via the hosted LLM.
//!
//! Relative date phrases ("tomorrow", "next week") must never reach
//! storage, and queries retrieve better against absolute dates. The
//! normalizer asks the model to rewrite them against the current clock.
//!
//! Normalization is best-effort and fail-open: any endpoint error returns
//! the original text unchanged. A memory stored un-normalized beats a
//! memory lost to a transient timeout.

use crate::clock::{Clock, DateInfo};
use memex_llm::{CompletionRequest, LlmClient};
use std::sync::Arc;

/// Which instruction set to use for a normalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Incoming memory text: rewrite dates inline and append the
    /// recording-time footer.
    Statement,

    /// User question: rewrite dates only, otherwise return verbatim.
    Query,
}

/// Rewrites relative date phrases into absolute calendar dates.
pub struct DateNormalizer {
    llm: Arc<dyn LlmClient>,
    clock: Arc<dyn Clock>,
    model: String,
}

impl DateNormalizer {
    pub fn new(llm: Arc<dyn LlmClient>, clock: Arc<dyn Clock>, model: impl Into<String>) -> Self {
        Self {
            llm,
            clock,
            model: model.into(),
        }
    }

    /// Normalize `text` against the current clock.
    ///
    /// Returns the rewritten text with surrounding whitespace and quote
    /// characters stripped, or the original text on any endpoint failure.
    pub async fn normalize(&self, text: &str, mode: NormalizeMode) -> String {
        let now = self.clock.now();
        let date = DateInfo::from_datetime(&now);
        let instruction = build_instruction(text, mode, &date);

        let request = CompletionRequest::new(&self.model, instruction);

        match self.llm.complete(&request).await {
            Ok(response) if !response.is_empty() => clean_output(&response.content),
            Ok(_) => {
                tracing::warn!("Date normalization returned no text, keeping original");
                text.to_string()
            }
            Err(e) => {
                tracing::warn!("Date normalization failed, keeping original: {}", e);
                text.to_string()
            }
        }
    }
}

/// Build the mode-specific instruction prompt.
fn build_instruction(text: &str, mode: NormalizeMode, date: &DateInfo) -> String {
    match mode {
        NormalizeMode::Query => format!(
            "Current date is {full_date}.\n\
             Convert any relative date references (today, tomorrow, next week, etc.) \
             in this query to actual dates. If there is nothing relative, return the \
             query exactly as it is and change nothing else.\n\
             Original query: \"{text}\"\n\
             Only output the converted query with no explanations or additional text.",
            full_date = date.full_date,
            text = text,
        ),
        NormalizeMode::Statement => format!(
            "Current date is {full_date} at {time}.\n\
             1. Convert any relative date references (today, tomorrow, next week, etc.) \
             in this text to their actual dates, adding the day of week where helpful.\n\
             2. Keep every other detail exactly as written.\n\
             3. At the end of the text, add a new line and append:\n\
             \"(Note recorded on {full_date} at {time})\"\n\
             Original text: \"{text}\"\n\
             Only output the converted text with no explanations or additional text.",
            full_date = date.full_date,
            time = date.time,
            text = text,
        ),
    }
}

/// Strip surrounding whitespace and quote characters from model output.
fn clean_output(content: &str) -> String {
    content.trim().trim_matches('"').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Local, TimeZone};
    use memex_llm::MockLlm;

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Local.with_ymd_and_hms(2025, 1, 11, 15, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_query_mode_passthrough() {
        // Model echoes queries with no relative dates
        let mock = Arc::new(MockLlm::new());
        mock.push_response("What did I do with Sam?");

        let normalizer = DateNormalizer::new(mock.clone(), fixed_clock(), "mistral-large2");
        let result = normalizer
            .normalize("What did I do with Sam?", NormalizeMode::Query)
            .await;

        assert_eq!(result, "What did I do with Sam?");
    }

    #[tokio::test]
    async fn test_output_quotes_and_whitespace_stripped() {
        let mock = Arc::new(MockLlm::new());
        mock.push_response("  \"On January 12, 2025 I'm meeting Sam\"\n");

        let normalizer = DateNormalizer::new(mock, fixed_clock(), "mistral-large2");
        let result = normalizer
            .normalize("Tomorrow I'm meeting Sam", NormalizeMode::Statement)
            .await;

        assert_eq!(result, "On January 12, 2025 I'm meeting Sam");
    }

    #[tokio::test]
    async fn test_endpoint_failure_is_fail_open() {
        let mock = Arc::new(MockLlm::new().with_failing_completions());

        let normalizer = DateNormalizer::new(mock, fixed_clock(), "mistral-large2");
        let result = normalizer
            .normalize("Tomorrow I'm meeting Sam", NormalizeMode::Statement)
            .await;

        assert_eq!(result, "Tomorrow I'm meeting Sam");
    }

    #[tokio::test]
    async fn test_empty_completion_keeps_original() {
        let mock = Arc::new(MockLlm::new().with_default_response(""));

        let normalizer = DateNormalizer::new(mock, fixed_clock(), "mistral-large2");
        let result = normalizer
            .normalize("Had coffee today", NormalizeMode::Query)
            .await;

        assert_eq!(result, "Had coffee today");
    }

    #[tokio::test]
    async fn test_statement_instruction_carries_clock_and_footer() {
        let mock = Arc::new(MockLlm::new());

        let normalizer = DateNormalizer::new(mock.clone(), fixed_clock(), "mistral-large2");
        normalizer
            .normalize("Tomorrow I'm meeting Sam", NormalizeMode::Statement)
            .await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "mistral-large2");

        let prompt = &requests[0].prompt;
        assert!(prompt.contains("Saturday, January 11, 2025"));
        assert!(prompt.contains("03:00 PM"));
        assert!(prompt.contains("(Note recorded on"));
        assert!(prompt.contains("Tomorrow I'm meeting Sam"));
    }

    #[tokio::test]
    async fn test_query_instruction_has_no_footer() {
        let mock = Arc::new(MockLlm::new());

        let normalizer = DateNormalizer::new(mock.clone(), fixed_clock(), "mistral-large2");
        normalizer
            .normalize("What's on tomorrow?", NormalizeMode::Query)
            .await;

        let prompt = &mock.requests()[0].prompt;
        assert!(prompt.contains("Saturday, January 11, 2025"));
        assert!(!prompt.contains("(Note recorded on"));
    }
}
