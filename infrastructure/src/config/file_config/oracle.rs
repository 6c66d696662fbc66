//! Oracle client configuration from TOML (`[oracle]` section)

use crate::oracle::OracleProvider;
use qforge_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Oracle client configuration
///
/// # Example
///
/// ```toml
/// [oracle]
/// provider = "nebius"                       # nebius | nscale | huggingface | openai
/// model = "Qwen/Qwen2.5-Coder-32B-Instruct"
/// api_key_env = "NEBIUS_API_KEY"            # or api_key = "..."
/// temperature = 1.0
/// request_timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    pub provider: String,
    pub model: String,
    /// Literal API key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Environment variable holding the API key (provider default when unset)
    pub api_key_env: Option<String>,
    /// Overrides the provider's endpoint
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub request_timeout_seconds: u64,
    /// Retries for HTTP 429 and 5xx responses
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            provider: "nebius".to_string(),
            model: "Qwen/Qwen2.5-Coder-32B-Instruct".to_string(),
            api_key: None,
            api_key_env: None,
            base_url: None,
            temperature: None,
            request_timeout_seconds: 120,
            max_retries: 5,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }
}

impl FileOracleConfig {
    /// Parse the provider name, collecting an issue when it is unknown.
    ///
    /// An unknown provider is only an error when no `base_url` is given.
    pub fn parse_provider(&self) -> (Option<OracleProvider>, Vec<ConfigIssue>) {
        match self.provider.parse::<OracleProvider>() {
            Ok(provider) => (Some(provider), Vec::new()),
            Err(e) if self.base_url.is_some() => (
                None,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!("oracle.provider: {}; using oracle.base_url", e),
                )],
            ),
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider,
                    format!("oracle.provider: {} and no oracle.base_url is set", e),
                )],
            ),
        }
    }

    /// Endpoint base URL: explicit `base_url`, else the provider's.
    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url.clone().or_else(|| {
            self.parse_provider()
                .0
                .map(|p| p.default_base_url().to_string())
        })
    }

    /// Environment variable consulted for the API key.
    pub fn key_env(&self) -> String {
        self.api_key_env.clone().unwrap_or_else(|| {
            self.parse_provider()
                .0
                .unwrap_or_default()
                .default_key_env()
                .to_string()
        })
    }

    /// API key from `api_key`, else from the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(self.key_env()).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_provider().1;

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModel,
                "oracle.model: model name cannot be empty",
            ));
        }

        if self.request_timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "oracle.request_timeout_seconds cannot be 0",
            ));
        }

        issues
    }
}
