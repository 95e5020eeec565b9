//! Error types for the memex CLI.
//!
//! This module defines a unified error enum covering all error categories in
//! the application: configuration, I/O, warehouse session, store, search,
//! LLM, and prompt errors.
//!
//! Degraded-service conditions (an empty search result, a scoring call that
//! times out mid-query) are deliberately NOT errors. Each pipeline component
//! absorbs those at its own boundary and substitutes a safe default, so the
//! only hard failure a caller ever sees is connection establishment.

use thiserror::Error;

/// Unified error type for the memex CLI.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Warehouse session establishment errors (fatal at startup)
    #[error("Session error: {0}")]
    Session(String),

    /// Memory store errors (insert/scan/provision)
    #[error("Store error: {0}")]
    Store(String),

    /// Hosted search service errors
    #[error("Search error: {0}")]
    Search(String),

    /// LLM endpoint errors (completion, relevance scoring)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
