//! RAG pipeline orchestration.
//!
//! Composes the normalizer, retriever, filter, prompt builder, and
//! generator into the two request-scoped operations of the application:
//!
//! - `ingest`: normalize (statement mode) and persist a memory
//! - `query`: normalize (query mode), retrieve, filter, prompt, generate
//!
//! The pipeline itself is stateless between calls; it only holds the
//! long-lived service handles injected at construction. Steps run strictly
//! sequentially, each one blocking on its external call in turn.

use crate::clock::Clock;
use crate::filter::RelevanceFilter;
use crate::generate::AnswerGenerator;
use crate::normalize::{DateNormalizer, NormalizeMode};
use crate::prompt::PromptBuilder;
use crate::retrieve::PassageRetriever;
use memex_core::{config, AppResult, MemexConfig};
use memex_llm::LlmClient;
use memex_warehouse::{MemoryStore, SearchService};
use std::sync::Arc;

/// Long-lived handles to the external collaborators.
///
/// Acquired once at startup and injected into the pipeline; nothing in the
/// orchestration core reaches for ambient globals.
#[derive(Clone)]
pub struct Services {
    pub llm: Arc<dyn LlmClient>,
    pub search: Arc<dyn SearchService>,
    pub store: Arc<dyn MemoryStore>,
    pub clock: Arc<dyn Clock>,
}

/// Tuning knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Model identifier for normalization and generation calls
    pub model: String,

    /// Maximum passages requested from the search service
    pub retrieval_limit: usize,

    /// Minimum relevance score for a passage to reach the prompt
    pub relevance_threshold: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            model: config::DEFAULT_MODEL.to_string(),
            retrieval_limit: config::DEFAULT_RETRIEVAL_LIMIT,
            relevance_threshold: config::DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl From<&MemexConfig> for PipelineOptions {
    fn from(config: &MemexConfig) -> Self {
        Self {
            model: config.model.clone(),
            retrieval_limit: config.retrieval_limit,
            relevance_threshold: config.relevance_threshold,
        }
    }
}

/// The ingest/query orchestrator.
pub struct RagPipeline {
    normalizer: DateNormalizer,
    retriever: PassageRetriever,
    filter: RelevanceFilter,
    prompts: PromptBuilder,
    generator: AnswerGenerator,
    store: Arc<dyn MemoryStore>,
}

impl RagPipeline {
    /// Wire the pipeline from injected services and options.
    pub fn new(services: Services, options: PipelineOptions) -> AppResult<Self> {
        Ok(Self {
            normalizer: DateNormalizer::new(
                services.llm.clone(),
                services.clock.clone(),
                options.model.clone(),
            ),
            retriever: PassageRetriever::new(services.search.clone(), options.retrieval_limit),
            filter: RelevanceFilter::new(services.llm.clone(), options.relevance_threshold),
            prompts: PromptBuilder::new()?,
            generator: AnswerGenerator::new(services.llm.clone(), options.model),
            store: services.store,
        })
    }

    /// Normalize and persist one memory.
    ///
    /// Returns true on success. An insert failure is logged and reported as
    /// false, never raised. Each call appends a new row even for identical
    /// text.
    pub async fn ingest(&self, text: &str) -> bool {
        let normalized = self
            .normalizer
            .normalize(text, NormalizeMode::Statement)
            .await;

        match self.store.insert(&normalized).await {
            Ok(()) => {
                tracing::info!("Memory stored ({} bytes)", normalized.len());
                true
            }
            Err(e) => {
                tracing::error!("Failed to store memory: {}", e);
                false
            }
        }
    }

    /// Answer a question over the stored memories.
    ///
    /// Always returns a non-empty answer string: degraded retrieval or
    /// scoring shrinks the context, and the generator falls back to literal
    /// strings on endpoint failure.
    pub async fn query(&self, text: &str) -> String {
        let normalized = self.normalizer.normalize(text, NormalizeMode::Query).await;

        let passages = self.retriever.retrieve(&normalized).await;
        tracing::debug!("Retrieved {} candidate passages", passages.len());

        let kept = self.filter.filter(&normalized, passages).await;
        tracing::debug!("{} passages kept after relevance filtering", kept.len());

        let prompt = match self.prompts.build(&normalized, &kept) {
            Ok(prompt) => prompt,
            Err(e) => {
                // Template failure must not kill the request; ask bare
                tracing::error!("Prompt assembly failed: {}", e);
                format!("User's current question: {}", normalized)
            }
        };

        self.generator.generate(&prompt).await
    }
}
