//! Warehouse boundary crate for memex.
//!
//! Everything that talks to the managed data platform lives here: session
//! establishment, the hosted completion/scoring client, the memory table
//! store, and the hosted search service. The rest of the application only
//! sees the `MemoryStore` and `SearchService` traits (plus `LlmClient` from
//! `memex-llm`), so the pipeline can be exercised entirely against mocks.
//!
//! All responses are parsed defensively at this boundary: a malformed row
//! is skipped, a malformed body is an error the caller degrades from, and
//! raw JSON never leaks inward.

pub mod cortex;
pub mod search;
pub mod session;
pub mod store;

// Re-export main types
pub use cortex::CortexClient;
pub use search::{CortexSearchService, SearchHit, SearchService};
pub use session::{ConnectionConfig, WarehouseSession};
pub use store::{MemoryRow, MemoryStore, WarehouseStore};
