//! OpenAI-compatible HTTP backend.
//!
//! Serves every provider exposing the chat-completions wire format; the
//! `base_url` selects the vendor (OpenAI by default, DeepSeek with its
//! endpoint, any compatible gateway otherwise).

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::types::{ContentBackend, GenerationRequest, GenerationResult};
use classcheck_types::config::LlmSection;
use classcheck_types::error::LlmError;

/// Default OpenAI chat-completions endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default DeepSeek chat-completions endpoint (OpenAI-compatible).
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Request parameters resolved from configuration.
#[derive(Debug, Clone)]
pub struct HttpParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for HttpParams {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.2,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP backend for OpenAI-compatible chat-completions APIs.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    provider: String,
    base_url: String,
    api_key: String,
    model: String,
    params: HttpParams,
}

impl OpenAiCompatibleBackend {
    /// Create a backend.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Misconfiguration`] if the HTTP client cannot be
    /// constructed.
    pub fn new(
        provider: impl Into<String>,
        api_key: String,
        base_url: String,
        model: String,
        params: HttpParams,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(params.timeout)
            .build()
            .map_err(|e| LlmError::Misconfiguration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            provider: provider.into(),
            base_url,
            api_key,
            model,
            params,
        })
    }

    /// Create a backend from the `[llm]` configuration section.
    ///
    /// The API key is read from the environment variable named by
    /// `api_key_env` (falling back to `default_key_env`); the key itself
    /// never lives in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Misconfiguration`] if the key variable is unset
    /// or no model is configured.
    pub fn from_config(
        config: &LlmSection,
        default_key_env: &str,
        default_base_url: &str,
    ) -> Result<Self, LlmError> {
        let api_key_env = config.api_key_env.as_deref().unwrap_or(default_key_env);
        let api_key = std::env::var(api_key_env).map_err(|_| {
            LlmError::Misconfiguration(format!(
                "API key not found in environment variable '{api_key_env}'. \
                 Set this variable or configure a different api_key_env in [llm]."
            ))
        })?;

        let model = config.model.clone().ok_or_else(|| {
            LlmError::Misconfiguration(
                "no model configured; set [llm] model = \"model-name\"".to_string(),
            )
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url.to_string());

        let params = HttpParams {
            max_tokens: config.max_tokens.unwrap_or(2048),
            temperature: config.temperature.unwrap_or(0.2),
            timeout: config
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        };

        Self::new(config.provider.clone(), api_key, base_url, model, params)
    }
}

#[async_trait]
impl ContentBackend for OpenAiCompatibleBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, LlmError> {
        debug!(
            provider = %self.provider,
            model = %self.model,
            max_tokens = self.params.max_tokens,
            temperature = self.params.temperature,
            "dispatching generation request"
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_role.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        duration: self.params.timeout,
                    }
                } else {
                    LlmError::Transport(format!("request to {} failed: {e}", self.provider))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(error_for_status(&self.provider, status, &detail));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            LlmError::Transport(format!("failed to parse {} response: {e}", self.provider))
        })?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            LlmError::Transport(format!("{} response missing choices[0]", self.provider))
        })?;

        let content = choice.message.content.ok_or_else(|| {
            LlmError::Transport(format!(
                "{} response missing content in choices[0]",
                self.provider
            ))
        })?;

        let mut result = GenerationResult::new(content, self.provider.clone(), self.model.clone());
        if let Some(usage) = body.usage {
            result = result.with_tokens(usage.prompt_tokens, usage.completion_tokens);
        }

        debug!(
            provider = %self.provider,
            tokens_input = ?result.tokens_input,
            tokens_output = ?result.tokens_output,
            "generation completed"
        );

        Ok(result)
    }
}

/// Map an HTTP error status to the matching [`LlmError`] kind.
fn error_for_status(provider: &str, status: StatusCode, detail: &str) -> LlmError {
    let message = format!("{provider} returned {status}: {detail}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::ProviderAuth(message),
        StatusCode::TOO_MANY_REQUESTS => LlmError::ProviderQuota(message),
        status if status.is_server_error() => LlmError::ProviderOutage(message),
        _ => LlmError::Transport(message),
    }
}

/// Chat-completions message.
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions request body.
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

/// Chat-completions response message.
#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// One choice in the response.
#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChatResponseMessage,
}

/// Token usage block.
#[derive(Debug, Clone, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

/// Chat-completions response body.
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_provider_semantics() {
        assert!(matches!(
            error_for_status("openai", StatusCode::UNAUTHORIZED, "bad key"),
            LlmError::ProviderAuth(_)
        ));
        assert!(matches!(
            error_for_status("openai", StatusCode::FORBIDDEN, ""),
            LlmError::ProviderAuth(_)
        ));
        assert!(matches!(
            error_for_status("openai", StatusCode::TOO_MANY_REQUESTS, ""),
            LlmError::ProviderQuota(_)
        ));
        assert!(matches!(
            error_for_status("openai", StatusCode::INTERNAL_SERVER_ERROR, ""),
            LlmError::ProviderOutage(_)
        ));
        assert!(matches!(
            error_for_status("openai", StatusCode::BAD_REQUEST, ""),
            LlmError::Transport(_)
        ));
    }

    #[test]
    fn from_config_without_key_is_a_misconfiguration() {
        let config = LlmSection {
            model: Some("gpt-4".to_string()),
            api_key_env: Some("CLASSCHECK_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..LlmSection::default()
        };
        let err =
            OpenAiCompatibleBackend::from_config(&config, "OPENAI_API_KEY", OPENAI_BASE_URL)
                .unwrap_err();
        assert!(matches!(err, LlmError::Misconfiguration(_)));
    }

    #[test]
    fn chat_request_serializes_system_then_user() {
        let body = ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "rôle".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "question".to_string(),
                },
            ],
            max_tokens: 16,
            temperature: 0.2,
            stream: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["stream"], false);
    }
}
