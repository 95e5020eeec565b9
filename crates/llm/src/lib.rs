//! LLM integration crate for memex.
//!
//! This crate provides a provider-agnostic abstraction for the two hosted
//! language-model operations the pipeline needs: text completion and
//! query/passage relevance scoring. The production implementation lives in
//! `memex-warehouse` (the hosted completion and scoring endpoints); this
//! crate also ships a deterministic mock provider for tests and offline
//! development.
//!
//! # Example
//! ```no_run
//! use memex_llm::{CompletionRequest, LlmClient, MockLlm};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MockLlm::new();
//! let request = CompletionRequest::new("mistral-large2", "Hello, world!");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{CompletionRequest, CompletionResponse, LlmClient};
pub use providers::MockLlm;
