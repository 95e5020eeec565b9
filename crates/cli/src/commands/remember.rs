//! Remember command handler (the "storage" surface).

use clap::Args;
use memex_core::{AppError, AppResult, MemexConfig};
use std::path::PathBuf;

/// Store a new memory
#[derive(Args, Debug)]
pub struct RememberCommand {
    /// The memory text to store
    pub text: Option<String>,

    /// Read the memory text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

impl RememberCommand {
    pub async fn execute(&self, config: &MemexConfig) -> AppResult<()> {
        let text = self.get_text()?;

        if text.trim().is_empty() {
            return Err(AppError::Config(
                "Please enter a memory to save".to_string(),
            ));
        }

        let pipeline = super::build_pipeline(config).await?;

        if pipeline.ingest(&text).await {
            println!("Memory saved successfully!");
            Ok(())
        } else {
            println!("Failed to save memory. Please try again.");
            Err(AppError::Store("Memory was not saved".to_string()))
        }
    }

    fn get_text(&self) -> AppResult<String> {
        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }

        if let Some(ref path) = self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read memory file {:?}: {}", path, e))
            });
        }

        Err(AppError::Config("No memory text provided".to_string()))
    }
}
