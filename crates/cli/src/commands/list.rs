//! List command handler: maintenance view of stored memories.

use clap::Args;
use memex_core::{AppError, AppResult, MemexConfig};
use memex_warehouse::{MemoryStore, WarehouseStore};

/// List stored memories
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub async fn execute(&self, config: &MemexConfig) -> AppResult<()> {
        let session = super::establish_session(config).await?;
        let store = WarehouseStore::new(session, config.memory_table.clone());

        let rows = store.scan().await?;

        if self.json {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        if rows.is_empty() {
            println!("No memories stored yet.");
            return Ok(());
        }

        for row in &rows {
            println!("[{}] {}", row.id, row.text);
        }
        println!("{} memories stored.", rows.len());

        Ok(())
    }
}
