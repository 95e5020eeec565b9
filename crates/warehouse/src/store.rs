//! Backing store for persisted memories.
//!
//! The store is a single table of (auto-assigned id, text content) rows
//! owned entirely by the platform. The pipeline only inserts; `scan` exists
//! for the maintenance tooling (`memex list`), not for query answering.

use crate::session::WarehouseSession;
use memex_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One persisted memory row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRow {
    /// Identifier assigned by the store on insert
    pub id: i64,

    /// Normalized memory text (absolute dates + recording footer)
    #[serde(rename = "text_content")]
    pub text: String,
}

/// Trait for the memory table.
#[async_trait::async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append one memory row. Not idempotent: identical text inserts a new
    /// row each time.
    async fn insert(&self, text: &str) -> AppResult<()>;

    /// Read back every stored row (maintenance tooling only).
    async fn scan(&self) -> AppResult<Vec<MemoryRow>>;
}

#[derive(Debug, Serialize)]
struct InsertRequest<'a> {
    table: &'a str,
    text_content: &'a str,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    #[serde(default)]
    rows_inserted: u64,
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    table: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    rows: Vec<MemoryRow>,
}

#[derive(Debug, Serialize)]
struct ProvisionRequest<'a> {
    table: &'a str,
    search_service: &'a str,
}

/// Memory store backed by the warehouse table.
pub struct WarehouseStore {
    session: Arc<WarehouseSession>,
    table: String,
}

impl WarehouseStore {
    /// Create a store over an established session.
    pub fn new(session: Arc<WarehouseSession>, table: impl Into<String>) -> Self {
        Self {
            session,
            table: table.into(),
        }
    }

    /// Create the memory table and its search service if they do not exist.
    ///
    /// Used by `memex init` only; the pipeline assumes an already
    /// provisioned store.
    pub async fn provision(&self, search_service: &str) -> AppResult<()> {
        tracing::info!(
            "Provisioning table '{}' and search service '{}'",
            self.table,
            search_service
        );

        let request = ProvisionRequest {
            table: &self.table,
            search_service,
        };

        let _: serde_json::Value = self
            .session
            .post_json("/api/v1/provision", &request)
            .await
            .map_err(AppError::Store)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl MemoryStore for WarehouseStore {
    async fn insert(&self, text: &str) -> AppResult<()> {
        tracing::debug!("Inserting memory row ({} bytes)", text.len());

        let request = InsertRequest {
            table: &self.table,
            text_content: text,
        };

        let response: InsertResponse = self
            .session
            .post_json("/api/v1/rows", &request)
            .await
            .map_err(AppError::Store)?;

        if response.rows_inserted == 0 {
            return Err(AppError::Store("Insert affected no rows".to_string()));
        }

        Ok(())
    }

    async fn scan(&self) -> AppResult<Vec<MemoryRow>> {
        let request = ScanRequest { table: &self.table };

        let response: ScanResponse = self
            .session
            .post_json("/api/v1/rows/scan", &request)
            .await
            .map_err(AppError::Store)?;

        Ok(response.rows)
    }
}
