//! Init command handler: provisions the backing table and search service.

use clap::Args;
use memex_core::{AppResult, MemexConfig};
use memex_warehouse::WarehouseStore;

/// Provision the backing table and search service
#[derive(Args, Debug)]
pub struct InitCommand {}

impl InitCommand {
    pub async fn execute(&self, config: &MemexConfig) -> AppResult<()> {
        let session = super::establish_session(config).await?;
        let store = WarehouseStore::new(session, config.memory_table.clone());

        store.provision(&config.search_service).await?;

        println!(
            "Provisioned table '{}' and search service '{}'.",
            config.memory_table, config.search_service
        );
        Ok(())
    }
}
