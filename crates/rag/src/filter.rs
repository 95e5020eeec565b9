//! Relevance filtering of retrieved passages.
//!
//! Each candidate is scored against the query by the hosted scoring
//! endpoint and dropped below the configured threshold. When scoring is
//! unavailable the filter degrades to pass-through: for this use case an
//! unfiltered context is strictly better than an artificially empty one.

use memex_llm::LlmClient;
use std::sync::Arc;

/// Drops retrieved passages scoring below a relevance threshold.
pub struct RelevanceFilter {
    llm: Arc<dyn LlmClient>,
    threshold: f32,
}

impl RelevanceFilter {
    pub fn new(llm: Arc<dyn LlmClient>, threshold: f32) -> Self {
        Self { llm, threshold }
    }

    /// Keep passages scoring at or above the threshold, preserving order.
    pub async fn filter(&self, query: &str, passages: Vec<String>) -> Vec<String> {
        let mut kept = Vec::with_capacity(passages.len());

        for passage in passages {
            match self.llm.score(query, &passage).await {
                Ok(score) if score >= self.threshold => {
                    tracing::debug!("Passage kept (score {:.2})", score);
                    kept.push(passage);
                }
                Ok(score) => {
                    tracing::debug!(
                        "Passage dropped (score {:.2} < {:.2})",
                        score,
                        self.threshold
                    );
                }
                Err(e) => {
                    // Scoring unavailable: pass the passage through
                    tracing::warn!("Relevance scoring failed, keeping passage: {}", e);
                    kept.push(passage);
                }
            }
        }

        kept
    }
}
