//! OpenAI-compatible chat completions client.
//!
//! One system and one user message per call. HTTP 429 and 5xx responses are
//! retried with capped exponential backoff; every other failure is returned
//! to the caller. Usage reported by the provider is added to the client's
//! [`UsageCounter`].

use crate::config::FileOracleConfig;
use async_trait::async_trait;
use qforge_application::{OracleError, SynthesisOracle};
use qforge_domain::{TokenUsage, UsageCounter};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Retry policy for transient provider errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Requests sent before giving up.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    total_tokens: Option<u64>,
}

impl From<ChatUsage> for TokenUsage {
    fn from(usage: ChatUsage) -> Self {
        match usage.total_tokens {
            Some(total) => TokenUsage::new(usage.prompt_tokens, usage.completion_tokens, total),
            None => TokenUsage::from_parts(usage.prompt_tokens, usage.completion_tokens),
        }
    }
}

/// Synthesis oracle backed by an OpenAI-compatible HTTP endpoint.
pub struct HttpSynthesisOracle {
    http: Client,
    url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    retry: RetryPolicy,
    usage: UsageCounter,
}

impl HttpSynthesisOracle {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            url: completions_url(base_url),
            model: model.into(),
            api_key,
            temperature: None,
            retry: RetryPolicy::default(),
            usage: UsageCounter::new(),
        })
    }

    /// Build from the `[oracle]` section.
    pub fn from_config(config: &FileOracleConfig) -> Result<Self, OracleError> {
        let base_url = config.resolved_base_url().ok_or_else(|| {
            OracleError::Other(format!(
                "no endpoint for provider '{}'; set oracle.base_url",
                config.provider
            ))
        })?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                "No API key found (oracle.api_key or ${}); requests are sent unauthenticated",
                config.key_env()
            );
        }

        Ok(Self::new(&base_url, &config.model, api_key, config.request_timeout())?
            .with_temperature(config.temperature)
            .with_retry(RetryPolicy {
                max_retries: config.max_retries,
                initial_backoff: Duration::from_millis(config.initial_backoff_ms),
                max_backoff: Duration::from_millis(config.max_backoff_ms),
            }))
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request_body(&self, prompt: &str, system: &str, max_output: u32) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "max_tokens": max_output,
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        body
    }

    fn parse_response(&self, response: ChatResponse) -> Result<String, OracleError> {
        if let Some(usage) = response.usage {
            self.usage.record(usage.into());
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        Ok(content)
    }
}

/// `<base>/chat/completions`, tolerating a trailing slash on the base.
fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl SynthesisOracle for HttpSynthesisOracle {
    async fn generate(&self, prompt: &str, system: &str, max_output: u32) -> Result<String, OracleError> {
        let body = self.build_request_body(prompt, system, max_output);
        debug!(
            "POST {} (model {}, max_tokens {})",
            self.url, self.model, max_output
        );

        let mut last_status = None;
        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                let backoff = self.retry.backoff(attempt);
                warn!(
                    "Retrying oracle call in {}ms (attempt {}/{})",
                    backoff.as_millis(),
                    attempt,
                    self.retry.max_retries
                );
                tokio::time::sleep(backoff).await;
            }

            let mut request = self.http.post(&self.url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => return Err(OracleError::Timeout),
                Err(e) => return Err(OracleError::ConnectionError(e.to_string())),
            };

            let status = response.status().as_u16();
            if is_retryable_status(status) {
                last_status = Some(status);
                continue;
            }

            if !response.status().is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(OracleError::Provider { status, message });
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;
            return self.parse_response(parsed);
        }

        let attempts = self.retry.attempts();
        match last_status {
            Some(429) => Err(OracleError::RateLimited { attempts }),
            Some(status) => Err(OracleError::Provider {
                status,
                message: format!("still failing after {} attempts", attempts),
            }),
            None => Err(OracleError::Other("no request was sent".to_string())),
        }
    }

    fn usage(&self) -> &UsageCounter {
        &self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> HttpSynthesisOracle {
        HttpSynthesisOracle::new(
            "https://api.studio.nebius.com/v1/",
            "test-model",
            Some("key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_completions_url() {
        assert_eq!(
            oracle().url(),
            "https://api.studio.nebius.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8000/v1"),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let body = oracle()
            .with_temperature(Some(1.0))
            .build_request_body("prompt", "system", 512);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "prompt");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["temperature"], 1.0);

        let body = oracle().build_request_body("p", "s", 10);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_records_usage() {
        let oracle = oracle();
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  OPENQASM 3.0;  "}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        }))
        .unwrap();

        assert_eq!(oracle.parse_response(response).unwrap(), "OPENQASM 3.0;");
        assert_eq!(oracle.usage().totals(), TokenUsage::new(12, 4, 16));
    }

    #[test]
    fn test_parse_empty_response() {
        let response: ChatResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(matches!(
            oracle().parse_response(response),
            Err(OracleError::EmptyResponse)
        ));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(3),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_secs(1));
        assert_eq!(policy.backoff(3), Duration::from_secs(2));
        assert_eq!(policy.backoff(4), Duration::from_secs(3));
        assert_eq!(policy.backoff(30), Duration::from_secs(3));
    }

    #[test]
    fn test_attempts_saturate() {
        assert_eq!(RetryPolicy::default().attempts(), 6);
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), u32::MAX);
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
    }
}
