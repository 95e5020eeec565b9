//! Passage retrieval from the hosted search service.
//!
//! Ranking happens entirely inside the platform; the retriever just asks
//! for the top results and keeps their order. A failed or empty search is
//! "no context available", never an error to the caller.

use memex_warehouse::SearchService;
use std::sync::Arc;

/// Fetches the top-K stored passages for a normalized query.
pub struct PassageRetriever {
    search: Arc<dyn SearchService>,
    limit: usize,
}

impl PassageRetriever {
    pub fn new(search: Arc<dyn SearchService>, limit: usize) -> Self {
        Self { search, limit }
    }

    /// Retrieve up to `limit` passage texts, most relevant first.
    pub async fn retrieve(&self, query: &str) -> Vec<String> {
        match self.search.search(query, self.limit).await {
            Ok(hits) => {
                tracing::debug!("Retrieved {} passages", hits.len());
                hits.into_iter()
                    .take(self.limit)
                    .map(|hit| hit.text)
                    .collect()
            }
            Err(e) => {
                tracing::warn!("Search failed, continuing with no context: {}", e);
                Vec::new()
            }
        }
    }
}
