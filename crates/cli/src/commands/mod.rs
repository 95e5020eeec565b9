//! Command handlers for the memex CLI.

pub mod ask;
pub mod chat;
pub mod init;
pub mod list;
pub mod remember;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use remember::RememberCommand;

use memex_core::{AppResult, MemexConfig};
use memex_rag::{PipelineOptions, RagPipeline, Services, SystemClock};
use memex_warehouse::{
    ConnectionConfig, CortexClient, CortexSearchService, WarehouseSession, WarehouseStore,
};
use std::sync::Arc;

/// Establish the warehouse session once for this invocation.
///
/// Connection failure here is the one fatal error in the system; commands
/// propagate it and the process exits non-zero.
pub(crate) async fn establish_session(config: &MemexConfig) -> AppResult<Arc<WarehouseSession>> {
    let connection = ConnectionConfig::from(config);
    WarehouseSession::connect(&connection).await
}

/// Build the injected service handles over an established session.
pub(crate) fn build_services(
    session: Arc<WarehouseSession>,
    config: &MemexConfig,
) -> Services {
    Services {
        llm: Arc::new(CortexClient::new(session.clone())),
        search: Arc::new(CortexSearchService::new(
            session.clone(),
            config.search_service.clone(),
        )),
        store: Arc::new(WarehouseStore::new(session, config.memory_table.clone())),
        clock: Arc::new(SystemClock),
    }
}

/// Connect and wire the full pipeline.
pub(crate) async fn build_pipeline(config: &MemexConfig) -> AppResult<RagPipeline> {
    let session = establish_session(config).await?;
    let services = build_services(session, config);
    RagPipeline::new(services, PipelineOptions::from(config))
}
