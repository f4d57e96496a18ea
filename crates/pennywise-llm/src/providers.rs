//! LLM Provider implementations

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Default number of tokens requested from a provider
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Get the provider kind
    fn kind(&self) -> ProviderKind;

    /// Complete a conversation, giving up after `timeout`
    async fn complete(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<CompletionResponse>;
}

// ============================================================================
// OpenAI-style chat wire format (shared by both providers)
// ============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatResponse {
    /// First choice's text. A blank reply counts as no reply.
    fn into_content(self) -> Result<String> {
        let content = self
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LLMError::InvalidResponse {
                message: "response contained no choices".to_string(),
            })?;

        if content.trim().is_empty() {
            return Err(LLMError::InvalidResponse {
                message: "response content was empty".to_string(),
            });
        }
        Ok(content)
    }
}

fn chat_messages(system: Option<String>, messages: Vec<Message>) -> Vec<ChatMessage> {
    system
        .map(|content| ChatMessage {
            role: MessageRole::System.as_str().to_string(),
            content,
        })
        .into_iter()
        .chain(messages.into_iter().map(|m| ChatMessage {
            role: m.role.as_str().to_string(),
            content: m.content,
        }))
        .collect()
}

/// POST a chat request and decode the provider's envelope.
///
/// Anything but HTTP 200 is a failure.
async fn post_chat<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    body: &ChatRequest,
    timeout: Duration,
) -> Result<T> {
    let timeout_err = || LLMError::Timeout {
        timeout_ms: timeout.as_millis(),
    };

    let response = client
        .post(url)
        .bearer_auth(token)
        .json(body)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                timeout_err()
            } else {
                LLMError::NetworkError {
                    message: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(LLMError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            timeout_err()
        } else {
            LLMError::InvalidResponse {
                message: e.to_string(),
            }
        }
    })
}

fn missing(setting: &str) -> LLMError {
    LLMError::ConfigurationError {
        message: format!("{} is not set", setting),
    }
}

// ============================================================================
// Euri Provider
// ============================================================================

/// Configuration for the Euri provider
#[derive(Debug, Clone)]
pub struct EuriConfig {
    /// API base; requests go to `{base_url}/chat/completions`
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl EuriConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("EURI_API_BASE").ok(),
            api_token: std::env::var("EURI_API_TOKEN").ok(),
            model: std::env::var("PENNYWISE_EURI_MODEL")
                .unwrap_or_else(|_| "gpt-4.1-nano".to_string()),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for EuriConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            model: "gpt-4.1-nano".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Euri wraps the OpenAI response in a `data` object
#[derive(Deserialize)]
struct EuriEnvelope {
    data: ChatResponse,
}

/// Euri chat-completions provider
pub struct EuriProvider {
    config: EuriConfig,
    client: reqwest::Client,
}

impl EuriProvider {
    pub fn new(config: EuriConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> Option<String> {
        self.config
            .base_url
            .as_deref()
            .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')))
    }
}

#[async_trait]
impl LLMProvider for EuriProvider {
    fn name(&self) -> &'static str {
        "Euri"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Euri
    }

    async fn complete(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<CompletionResponse> {
        let url = self.endpoint().ok_or_else(|| missing("EURI_API_BASE"))?;
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| missing("EURI_API_TOKEN"))?;

        let model = self.config.model.clone();
        let chat_request = ChatRequest {
            model: model.clone(),
            messages: chat_messages(request.system, request.messages),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        let envelope: EuriEnvelope =
            post_chat(&self.client, &url, token, &chat_request, timeout).await?;

        Ok(CompletionResponse {
            content: envelope.data.into_content()?,
            model: Some(model),
        })
    }
}

// ============================================================================
// Groq Provider
// ============================================================================

/// Configuration for the Groq provider
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Sent ahead of the conversation unless the request carries its own
    pub system_prompt: String,
}

impl GroqConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("PENNYWISE_GROQ_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("GROQ_API_KEY").ok(),
            model: std::env::var("PENNYWISE_GROQ_MODEL").unwrap_or(defaults.model),
            ..defaults
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "mixtral-8x7b-32768".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: "You are a financial advisor.".to_string(),
        }
    }
}

/// Groq OpenAI-compatible provider
pub struct GroqProvider {
    config: GroqConfig,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(config: GroqConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn complete(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<CompletionResponse> {
        let token = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| missing("GROQ_API_KEY"))?;

        let system = request
            .system
            .unwrap_or_else(|| self.config.system_prompt.clone());
        let model = self.config.model.clone();
        let chat_request = ChatRequest {
            model: model.clone(),
            messages: chat_messages(Some(system), request.messages),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        let response: ChatResponse =
            post_chat(&self.client, &self.endpoint(), token, &chat_request, timeout).await?;

        Ok(CompletionResponse {
            content: response.into_content()?,
            model: Some(model),
        })
    }
}
