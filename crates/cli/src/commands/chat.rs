//! Chat command handler: interactive loop with a running transcript.

use clap::Args;
use memex_core::{AppResult, MemexConfig};
use memex_rag::Transcript;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Interactive chat over your memories
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    pub async fn execute(&self, config: &MemexConfig) -> AppResult<()> {
        let pipeline = super::build_pipeline(config).await?;
        let mut transcript = Transcript::new();

        println!("Ask about your memories. Type 'exit' to quit.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all(b"you> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break; // EOF
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            transcript.push_user(question);

            let answer = pipeline.query(question).await;
            println!("memex> {}", answer);

            transcript.push_assistant(answer);
        }

        tracing::info!("Chat session ended after {} turns", transcript.len());
        Ok(())
    }
}
