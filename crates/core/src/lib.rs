//! Memex Core Library
//!
//! This crate provides the foundational utilities for the memex CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (connection + pipeline settings)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::MemexConfig;
pub use error::{AppError, AppResult};
