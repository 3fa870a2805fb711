//! Completion gateway client.
//!
//! One seam between the pipeline and the hosted completion capability:
//! given a (system, user) prompt pair, return the model's decoded JSON
//! payload or a classified failure. The HTTP implementation talks to an
//! OpenAI-compatible `/v1/chat/completions` endpoint; the fake substitutes
//! canned outcomes for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Completion gateway configuration.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Gateway base URL, without the `/v1/chat/completions` suffix.
    pub endpoint: String,
    pub model: String,
    /// Bearer credential. `None` fails every call before any network I/O.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ai.gateway.lovable.dev".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// A completion call failed before a shape-valid payload was decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("no API key configured for the completion gateway")]
    MissingApiKey,

    #[error("completion gateway rate limited the request")]
    RateLimited,

    #[error("completion gateway reported quota exhausted")]
    QuotaExceeded,

    #[error("HTTP {status} from completion gateway: {body}")]
    Gateway { status: u16, body: String },

    #[error("request to completion gateway failed: {0}")]
    Transport(String),

    #[error("completion response carried no message content")]
    EmptyChoices,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Trait for completion clients.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt pair and decode the model's JSON payload.
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Value, CompletionError>;
}

/// Real client for an OpenAI-compatible chat completions gateway.
pub struct HttpCompletionClient {
    config: CompletionConfig,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Value, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let url = format!("{}/v1/chat/completions", self.config.endpoint);
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "response_format": {"type": "json_object"},
        });

        debug!("Calling completion gateway: {} ({})", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Transport(format!(
                        "request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    CompletionError::Transport(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        match status.as_u16() {
            429 => return Err(CompletionError::RateLimited),
            402 => return Err(CompletionError::QuotaExceeded),
            code if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(CompletionError::Gateway { status: code, body });
            }
            _ => {}
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidJson(format!("failed to parse response: {e}")))?;

        // Extract content from OpenAI chat completions format
        let content = response_json
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .ok_or(CompletionError::EmptyChoices)?;

        serde_json::from_str(content).map_err(|e| CompletionError::InvalidJson(e.to_string()))
    }
}

/// Fake completion client for testing.
///
/// Plays back pre-defined outcomes in order, repeating the last one, and
/// counts the calls made so tests can assert that validation short-circuits
/// before any gateway traffic.
pub struct FakeCompletionClient {
    responses: Mutex<Vec<Result<Value, CompletionError>>>,
    call_count: Mutex<usize>,
}

impl FakeCompletionClient {
    pub fn new(responses: Vec<Result<Value, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    /// A fake that always returns the given payload.
    pub fn always_valid(json: Value) -> Self {
        Self::new(vec![Ok(json)])
    }

    /// A fake that always returns the given error.
    pub fn always_error(error: CompletionError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete_json(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<Value, CompletionError> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses
                .first()
                .cloned()
                .unwrap_or(Err(CompletionError::EmptyChoices))
        }
    }
}
