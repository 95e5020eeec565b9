//! Configuration management for the memex CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables (`MEMEX_*`)
//! - Command-line flags
//! - Config files (memex.yaml)
//!
//! All configuration is resolved once at process start. Connection options
//! (credentials, timeouts, retry budget) apply to session establishment
//! only — per-query calls inherit whatever the HTTP client enforces.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default model identifier for completion and normalization calls.
pub const DEFAULT_MODEL: &str = "mistral-large2";

/// Default number of passages requested from the search service.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 4;

/// Default minimum relevance score for a passage to reach the prompt.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.4;

/// Main application configuration.
///
/// Holds both the warehouse connection options and the pipeline tuning
/// knobs that affect CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemexConfig {
    /// Base URL of the warehouse platform API
    pub endpoint: String,

    /// Account identifier
    pub account: Option<String>,

    /// User name
    pub user: Option<String>,

    /// Password (environment only, never written to config files)
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Virtual warehouse to run against
    pub warehouse: Option<String>,

    /// Database holding the memory table
    pub database: Option<String>,

    /// Schema holding the memory table
    pub schema: Option<String>,

    /// Role to assume for the session
    pub role: Option<String>,

    /// Login timeout in seconds (connection establishment)
    pub login_timeout_secs: u64,

    /// Network timeout in seconds (per request)
    pub network_timeout_secs: u64,

    /// Retry budget for connection establishment (not per-query calls)
    pub max_connection_retries: u32,

    /// Model identifier for completion calls
    pub model: String,

    /// Maximum passages requested from the search service per query
    pub retrieval_limit: usize,

    /// Minimum relevance score for a passage to be kept
    pub relevance_threshold: f32,

    /// Name of the backing memory table
    pub memory_table: String,

    /// Name of the hosted search service over the memory table
    pub search_service: String,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    connection: Option<ConnectionSection>,
    pipeline: Option<PipelineSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConnectionSection {
    endpoint: Option<String>,
    account: Option<String>,
    user: Option<String>,
    warehouse: Option<String>,
    database: Option<String>,
    schema: Option<String>,
    role: Option<String>,
    #[serde(rename = "loginTimeoutSecs")]
    login_timeout_secs: Option<u64>,
    #[serde(rename = "networkTimeoutSecs")]
    network_timeout_secs: Option<u64>,
    #[serde(rename = "maxConnectionRetries")]
    max_connection_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PipelineSection {
    model: Option<String>,
    #[serde(rename = "retrievalLimit")]
    retrieval_limit: Option<usize>,
    #[serde(rename = "relevanceThreshold")]
    relevance_threshold: Option<f32>,
    #[serde(rename = "memoryTable")]
    memory_table: Option<String>,
    #[serde(rename = "searchService")]
    search_service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for MemexConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            account: None,
            user: None,
            password: None,
            warehouse: None,
            database: None,
            schema: None,
            role: None,
            login_timeout_secs: 30,
            network_timeout_secs: 30,
            max_connection_retries: 3,
            model: DEFAULT_MODEL.to_string(),
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            memory_table: "MEMORIES".to_string(),
            search_service: "MEMEX_SEARCH_SERVICE".to_string(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl MemexConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `MEMEX_ENDPOINT`: Base URL of the warehouse API
    /// - `MEMEX_ACCOUNT` / `MEMEX_USER` / `MEMEX_PASSWORD`: Credentials
    /// - `MEMEX_WAREHOUSE` / `MEMEX_DATABASE` / `MEMEX_SCHEMA` / `MEMEX_ROLE`
    /// - `MEMEX_CONFIG`: Path to a YAML config file
    /// - `MEMEX_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("MEMEX_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // YAML config file first; environment variables override it below
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("memex.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(endpoint) = std::env::var("MEMEX_ENDPOINT") {
            config.endpoint = endpoint;
        }

        config.account = std::env::var("MEMEX_ACCOUNT").ok().or(config.account);
        config.user = std::env::var("MEMEX_USER").ok().or(config.user);
        config.password = std::env::var("MEMEX_PASSWORD").ok();
        config.warehouse = std::env::var("MEMEX_WAREHOUSE").ok().or(config.warehouse);
        config.database = std::env::var("MEMEX_DATABASE").ok().or(config.database);
        config.schema = std::env::var("MEMEX_SCHEMA").ok().or(config.schema);
        config.role = std::env::var("MEMEX_ROLE").ok().or(config.role);

        if let Ok(model) = std::env::var("MEMEX_MODEL") {
            config.model = model;
        }

        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(conn) = config_file.connection {
            if let Some(endpoint) = conn.endpoint {
                result.endpoint = endpoint;
            }
            result.account = conn.account.or(result.account);
            result.user = conn.user.or(result.user);
            result.warehouse = conn.warehouse.or(result.warehouse);
            result.database = conn.database.or(result.database);
            result.schema = conn.schema.or(result.schema);
            result.role = conn.role.or(result.role);
            if let Some(secs) = conn.login_timeout_secs {
                result.login_timeout_secs = secs;
            }
            if let Some(secs) = conn.network_timeout_secs {
                result.network_timeout_secs = secs;
            }
            if let Some(retries) = conn.max_connection_retries {
                result.max_connection_retries = retries;
            }
        }

        if let Some(pipeline) = config_file.pipeline {
            if let Some(model) = pipeline.model {
                result.model = model;
            }
            if let Some(limit) = pipeline.retrieval_limit {
                result.retrieval_limit = limit;
            }
            if let Some(threshold) = pipeline.relevance_threshold {
                result.relevance_threshold = threshold;
            }
            if let Some(table) = pipeline.memory_table {
                result.memory_table = table;
            }
            if let Some(service) = pipeline.search_service {
                result.search_service = service;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and config
    /// files.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        config_file: Option<PathBuf>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration before attempting a connection.
    pub fn validate(&self) -> AppResult<()> {
        if self.endpoint.is_empty() {
            return Err(AppError::Config("Endpoint must not be empty".to_string()));
        }

        if self.retrieval_limit == 0 {
            return Err(AppError::Config(
                "Retrieval limit must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(AppError::Config(format!(
                "Relevance threshold must be in [0, 1], got {}",
                self.relevance_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MemexConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.retrieval_limit, 4);
        assert_eq!(config.relevance_threshold, 0.4);
        assert_eq!(config.login_timeout_secs, 30);
        assert_eq!(config.max_connection_retries, 3);
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = MemexConfig::default();
        let overridden = config.with_overrides(
            Some("http://warehouse.internal:9000".to_string()),
            None,
            Some("mistral-7b".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.endpoint, "http://warehouse.internal:9000");
        assert_eq!(overridden.model, "mistral-7b");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "connection:\n  endpoint: https://acct.example.com\n  database: MEMEX\n  maxConnectionRetries: 5\npipeline:\n  retrievalLimit: 6\n  relevanceThreshold: 0.5\nlogging:\n  level: warn\n"
        )
        .unwrap();

        let config = MemexConfig::default()
            .merge_yaml(&file.path().to_path_buf())
            .unwrap();

        assert_eq!(config.endpoint, "https://acct.example.com");
        assert_eq!(config.database, Some("MEMEX".to_string()));
        assert_eq!(config.max_connection_retries, 5);
        assert_eq!(config.retrieval_limit, 6);
        assert_eq!(config.relevance_threshold, 0.5);
        assert_eq!(config.log_level, Some("warn".to_string()));
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let mut config = MemexConfig::default();
        config.relevance_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_limit() {
        let mut config = MemexConfig::default();
        config.retrieval_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        let config = MemexConfig::default();
        assert!(config.validate().is_ok());
    }
}
