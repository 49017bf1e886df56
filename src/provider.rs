//! Generation Client
//!
//! The single request/response boundary with a chat-completion backend. The batch generator is
//! its only consumer; it receives the client as an explicit handle so tests can substitute
//! [`fake::ScriptedClient`].

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub mod fake;

pub use fake::ScriptedClient;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Completion options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: Option<f32>, // 0.0-2.0, higher = more varied
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Generation client trait
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a completion from a list of messages
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;

    /// One system + user exchange returning the raw response text.
    async fn generate_text(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, ApiError> {
        let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];
        let options = CompletionOptions {
            temperature: Some(temperature),
        };
        let response = self.complete(messages, options).await?;
        debug!(
            provider = self.provider_name(),
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Completion received"
        );
        if response.finish_reason.as_deref() == Some("length") {
            warn!(
                model = %response.model,
                "Completion truncated at the token limit; JSON is likely incomplete"
            );
        }
        Ok(response.content)
    }
}

/// Backend flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// api.openai.com
    #[serde(rename = "openai")]
    OpenAI,
    /// Any OpenAI-compatible chat-completions server
    LocalCustom,
}

/// Provider section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override; required for `local_custom`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider_type() -> ProviderType {
    ProviderType::OpenAI
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            endpoint: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if self.api_key_env.trim().is_empty() {
            return Err("api_key_env cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("Endpoint must be an http(s) URL: {}", endpoint));
            }
        }
        if self.provider_type == ProviderType::LocalCustom && self.endpoint.is_none() {
            return Err("local_custom provider requires an endpoint".to_string());
        }
        Ok(())
    }

    /// Read the credential from the environment.
    ///
    /// OpenAI requires it; local servers may run without one.
    pub fn resolve_api_key(&self) -> Result<Option<String>, ApiError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
            _ => match self.provider_type {
                ProviderType::OpenAI => Err(ApiError::MissingCredential(self.api_key_env.clone())),
                ProviderType::LocalCustom => Ok(None),
            },
        }
    }
}

// OpenAI-compatible API request/response structures
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn role_to_string(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
    }
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        map_status(status.as_u16(), error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status(status: u16, detail: String) -> ApiError {
    match status {
        401 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", detail)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", detail)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", detail)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, detail
        )),
    }
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_provider_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// OpenAI chat-completions client (also used for compatible local servers)
pub struct OpenAIClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
    provider_name: &'static str,
}

impl OpenAIClient {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_provider_http_client()?,
            model,
            api_key: Some(api_key),
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            provider_name: "openai",
        })
    }

    pub fn local(model: String, endpoint: String, api_key: Option<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_provider_http_client()?,
            model,
            api_key,
            base_url: endpoint.trim_end_matches('/').to_string(),
            provider_name: "local",
        })
    }
}

#[async_trait]
impl GenerationClient for OpenAIClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages
                .into_iter()
                .map(|msg| OpenAIMessage {
                    role: role_to_string(msg.role).to_string(),
                    content: msg.content,
                })
                .collect(),
            temperature: options.temperature,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }
        let response = builder.send().await.map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ProviderError("No choices in response".to_string()))?;

        let usage = completion
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.trim().to_string(),
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider factory for creating generation clients
pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the client named by the configuration, resolving the credential first.
    pub fn create_client(config: &ProviderConfig) -> Result<Box<dyn GenerationClient>, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let api_key = config.resolve_api_key()?;
        match config.provider_type {
            ProviderType::OpenAI => {
                let api_key =
                    api_key.ok_or_else(|| ApiError::MissingCredential(config.api_key_env.clone()))?;
                Ok(Box::new(OpenAIClient::new(
                    config.model.clone(),
                    api_key,
                    config.endpoint.clone(),
                )?))
            }
            ProviderType::LocalCustom => {
                let endpoint = config.endpoint.clone().ok_or_else(|| {
                    ApiError::ConfigError("local_custom provider requires an endpoint".to_string())
                })?;
                Ok(Box::new(OpenAIClient::local(
                    config.model.clone(),
                    endpoint,
                    api_key,
                )?))
            }
        }
    }
}
