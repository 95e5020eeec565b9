//! Hosted search service over the memory table.
//!
//! Ranking authority belongs entirely to the platform: we send a query and
//! a limit, and take the returned ordering as-is. The response rows are
//! dynamic JSON objects keyed by column name, so they are parsed
//! defensively here — a row missing the text column or carrying the wrong
//! JSON type is skipped, never propagated inward as type ambiguity.

use crate::session::WarehouseSession;
use memex_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Column requested from the search service.
const TEXT_COLUMN: &str = "text_content";

/// One ranked passage returned by the search service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Stored memory text
    pub text: String,
}

/// Trait for the hosted search service.
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// Return up to `limit` passages relevant to `query`, most relevant
    /// first. An empty corpus yields an empty vec, not an error.
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchHit>>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    service: &'a str,
    query: &'a str,
    columns: [&'a str; 1],
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Search service backed by the warehouse's hosted index.
pub struct CortexSearchService {
    session: Arc<WarehouseSession>,
    service: String,
}

impl CortexSearchService {
    /// Create a search client over an established session.
    pub fn new(session: Arc<WarehouseSession>, service: impl Into<String>) -> Self {
        Self {
            session,
            service: service.into(),
        }
    }
}

/// Extract text hits from raw result rows, skipping malformed entries.
fn parse_hits(results: Vec<serde_json::Value>) -> Vec<SearchHit> {
    results
        .into_iter()
        .filter_map(|row| {
            let text = row.get(TEXT_COLUMN)?.as_str()?;
            Some(SearchHit {
                text: text.to_string(),
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl SearchService for CortexSearchService {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchHit>> {
        tracing::debug!("Searching '{}' (limit: {})", self.service, limit);

        let request = SearchRequest {
            service: &self.service,
            query,
            columns: [TEXT_COLUMN],
            limit,
        };

        let response: SearchResponse = self
            .session
            .post_json("/api/v1/search", &request)
            .await
            .map_err(AppError::Search)?;

        let total = response.results.len();
        let hits = parse_hits(response.results);

        if hits.len() < total {
            tracing::warn!("Skipped {} malformed search result rows", total - hits.len());
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hits_keeps_order() {
        let results = vec![
            json!({"text_content": "first"}),
            json!({"text_content": "second"}),
        ];

        let hits = parse_hits(results);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "first");
        assert_eq!(hits[1].text, "second");
    }

    #[test]
    fn test_parse_hits_skips_missing_column() {
        let results = vec![
            json!({"text_content": "kept"}),
            json!({"other_column": "dropped"}),
        ];

        let hits = parse_hits(results);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "kept");
    }

    #[test]
    fn test_parse_hits_skips_wrong_type() {
        let results = vec![json!({"text_content": 42}), json!("not an object")];
        assert!(parse_hits(results).is_empty());
    }

    #[test]
    fn test_search_response_defaults_to_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_search_request_wire_format() {
        let request = SearchRequest {
            service: "MEMEX_SEARCH_SERVICE",
            query: "coffee",
            columns: [TEXT_COLUMN],
            limit: 4,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"service\":\"MEMEX_SEARCH_SERVICE\""));
        assert!(json.contains("\"columns\":[\"text_content\"]"));
        assert!(json.contains("\"limit\":4"));
    }
}
