//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ragline_core::{ChatMessage, Config, UsageInfo};

use crate::providers::provider::{Provider, ProviderError, ProviderResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// OpenAI-compatible API client.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    provider_name: String,
    max_tokens: u32,
}

/// Request body for the Chat Completions API
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl OpenAiCompatibleClient {
    /// Create a new OpenAI-compatible client with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::with_timeout(base_url, api_key, model, provider_name, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        provider_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            provider_name: provider_name.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Build a client from the merged env + TOML configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let model = &config.settings.model;
        Ok(Self::with_timeout(
            config.base_url(),
            config.api_key().map(str::to_string),
            config.model_id(),
            "ark",
            Duration::from_secs(model.timeout_seconds),
        )?
        .with_max_tokens(model.max_tokens))
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &self.api_key {
            let auth_value = format!("Bearer {}", api_key);
            if let Ok(header_value) = HeaderValue::from_str(&auth_value) {
                headers.insert(AUTHORIZATION, header_value);
            }
        }
        headers
    }

    fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// `/chat/completions` is appended directly when the base URL already
    /// ends in a version segment such as `/v1` or `/api/v3`.
    fn chat_completions_url(&self) -> String {
        let base = self.normalized_base_url();
        if ends_with_version_segment(&base) {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn convert_response(&self, response: ChatCompletionsResponse) -> ProviderResponse {
        let choice = response.choices.into_iter().next();
        let (text, stop_reason) = match choice {
            Some(choice) => (choice.message.content, choice.finish_reason),
            None => (None, None),
        };

        ProviderResponse {
            id: response.id,
            model: if response.model.is_empty() {
                self.model.clone()
            } else {
                response.model
            },
            text,
            usage: response.usage.map(|u| UsageInfo {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
            stop_reason,
        }
    }
}

fn ends_with_version_segment(base: &str) -> bool {
    let last = base.rsplit('/').next().unwrap_or_default();
    last.len() > 1
        && last.starts_with('v')
        && last[1..].chars().all(|c| c.is_ascii_digit())
}

#[async_trait::async_trait]
impl Provider for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError> {
        let url = self.chat_completions_url();

        let request_body = ChatCompletionsRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OpenAiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
        };

        debug!(
            provider = %self.provider_name,
            model = %self.model,
            messages = messages.len(),
            "sending chat completion"
        );

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        let completions_response: ChatCompletionsResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                let preview = if response_text.len() > 500 {
                    &response_text[..response_text.floor_char_boundary(500)]
                } else {
                    &response_text
                };
                ProviderError::InvalidFormat(format!(
                    "Failed to parse OpenAI-compatible response: {e}\nBody preview: {preview}"
                ))
            })?;
        Ok(self.convert_response(completions_response))
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}
