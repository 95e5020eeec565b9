//! Warehouse session establishment.
//!
//! A session is the single long-lived handle to the platform: one HTTP
//! client plus the token returned by the login endpoint. It is acquired
//! once at startup and shared (via `Arc`) by the store, the search service,
//! and the hosted LLM client. Connection establishment is the only place in
//! the system with retry logic; per-query calls get one attempt each.

use memex_core::{AppError, AppResult, MemexConfig};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Delay between connection attempts.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Connection options for session establishment.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the warehouse API
    pub endpoint: String,

    /// Account identifier
    pub account: Option<String>,

    /// User name
    pub user: Option<String>,

    /// Password
    pub password: Option<String>,

    /// Virtual warehouse
    pub warehouse: Option<String>,

    /// Database
    pub database: Option<String>,

    /// Schema
    pub schema: Option<String>,

    /// Role
    pub role: Option<String>,

    /// Connect timeout
    pub login_timeout: Duration,

    /// Per-request timeout
    pub network_timeout: Duration,

    /// Attempt budget for connection establishment
    pub max_retries: u32,
}

impl From<&MemexConfig> for ConnectionConfig {
    fn from(config: &MemexConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            account: config.account.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
            warehouse: config.warehouse.clone(),
            database: config.database.clone(),
            schema: config.schema.clone(),
            role: config.role.clone(),
            login_timeout: Duration::from_secs(config.login_timeout_secs),
            network_timeout: Duration::from_secs(config.network_timeout_secs),
            max_retries: config.max_connection_retries,
        }
    }
}

/// Login request sent to the session endpoint.
#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

/// Login response from the session endpoint.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    token: String,
}

/// Long-lived handle to the warehouse platform.
pub struct WarehouseSession {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl WarehouseSession {
    /// Establish a session against the platform.
    ///
    /// Retries up to `config.max_retries` times with a short backoff. A
    /// failure here is fatal to the process (there is nothing useful the
    /// pipeline can do without a session).
    pub async fn connect(config: &ConnectionConfig) -> AppResult<Arc<Self>> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.login_timeout)
            .timeout(config.network_timeout)
            .build()
            .map_err(|e| AppError::Session(format!("Failed to build HTTP client: {}", e)))?;

        let url = format!("{}/api/v1/session", config.endpoint);
        let request = SessionRequest {
            account: config.account.as_deref(),
            user: config.user.as_deref(),
            password: config.password.as_deref(),
            warehouse: config.warehouse.as_deref(),
            database: config.database.as_deref(),
            schema: config.schema.as_deref(),
            role: config.role.as_deref(),
        };

        let attempts = config.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            tracing::info!("Connecting to warehouse (attempt {}/{})", attempt, attempts);

            match Self::login(&http, &url, &request).await {
                Ok(token) => {
                    tracing::info!("Warehouse session established");
                    return Ok(Arc::new(Self {
                        http,
                        endpoint: config.endpoint.clone(),
                        token,
                    }));
                }
                Err(e) => {
                    tracing::warn!("Connection attempt {} failed: {}", attempt, e);
                    last_error = e;
                    if attempt < attempts {
                        tokio::time::sleep(RETRY_BACKOFF).await;
                    }
                }
            }
        }

        Err(AppError::Session(format!(
            "Could not establish warehouse session after {} attempts: {}",
            attempts, last_error
        )))
    }

    async fn login(
        http: &reqwest::Client,
        url: &str,
        request: &SessionRequest<'_>,
    ) -> Result<String, String> {
        let response = http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Failed to reach session endpoint: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("Session endpoint error ({}): {}", status, error_text));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse session response: {}", e))?;

        Ok(session.token)
    }

    /// POST a JSON body to an API path and parse the JSON response.
    ///
    /// Errors are returned as plain strings so each caller can wrap them in
    /// its own `AppError` variant.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, String>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("Failed to send request to {}: {}", path, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("API error ({}): {}", status, error_text));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response from {}: {}", path, e))
    }
}
