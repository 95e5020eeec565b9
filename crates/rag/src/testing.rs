//! Shared mock collaborators for pipeline tests.

use memex_core::{AppError, AppResult};
use memex_warehouse::{MemoryRow, MemoryStore, SearchHit, SearchService};
use std::sync::Mutex;

/// In-memory `MemoryStore` recording every insert.
pub(crate) struct StoreMock {
    rows: Mutex<Vec<String>>,
    fail_inserts: bool,
}

impl StoreMock {
    pub(crate) fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_inserts: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_inserts: true,
        }
    }

    /// Texts inserted so far, in order.
    pub(crate) fn texts(&self) -> Vec<String> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MemoryStore for StoreMock {
    async fn insert(&self, text: &str) -> AppResult<()> {
        if self.fail_inserts {
            return Err(AppError::Store("mock insert failure".to_string()));
        }
        self.rows.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn scan(&self) -> AppResult<Vec<MemoryRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, text)| MemoryRow {
                id: i as i64 + 1,
                text: text.clone(),
            })
            .collect())
    }
}

/// `SearchService` serving a fixed hit list and recording calls.
pub(crate) struct SearchMock {
    hits: Vec<String>,
    calls: Mutex<Vec<(String, usize)>>,
    fail: bool,
}

impl SearchMock {
    pub(crate) fn with_hits(hits: Vec<String>) -> Self {
        Self {
            hits,
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            hits: Vec::new(),
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// (query, limit) pairs received so far.
    pub(crate) fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchService for SearchMock {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<SearchHit>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), limit));

        if self.fail {
            return Err(AppError::Search("mock search failure".to_string()));
        }

        // Serves the full fixture list; limit enforcement is the
        // retriever's concern in these tests
        Ok(self
            .hits
            .iter()
            .map(|text| SearchHit { text: text.clone() })
            .collect())
    }
}
