//! Ask command handler: one-shot question answering.

use clap::Args;
use memex_core::{AppError, AppResult, MemexConfig};

/// Ask a one-shot question about your memories
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &MemexConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let pipeline = super::build_pipeline(config).await?;
        let answer = pipeline.query(&self.question).await;

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "answer": answer,
                "model": config.model,
            });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
