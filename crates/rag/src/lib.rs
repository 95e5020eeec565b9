//! RAG orchestration core for memex.
//!
//! This crate wires the pipeline described by the application: normalize
//! relative dates, retrieve stored passages, filter by relevance, build a
//! persona prompt, and generate an answer. Two operations exist:
//!
//! - **ingest**: normalize (statement mode) and persist a memory
//! - **query**: normalize (query mode), retrieve, filter, prompt, generate
//!
//! Every external collaborator is an injected trait object (`LlmClient`,
//! `SearchService`, `MemoryStore`, `Clock`), so the whole pipeline runs
//! against mocks in tests. Degraded services never abort a request: each
//! stage substitutes a safe default and the pipeline always completes with
//! some answer.

pub mod clock;
pub mod filter;
pub mod generate;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod retrieve;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use clock::{Clock, DateInfo, FixedClock, SystemClock};
pub use filter::RelevanceFilter;
pub use generate::AnswerGenerator;
pub use normalize::{DateNormalizer, NormalizeMode};
pub use pipeline::{PipelineOptions, RagPipeline, Services};
pub use prompt::PromptBuilder;
pub use retrieve::PassageRetriever;
pub use transcript::{ConversationTurn, Role, Transcript};
