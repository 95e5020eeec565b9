//! LLM provider implementations.

pub mod mock;

pub use mock::MockLlm;
