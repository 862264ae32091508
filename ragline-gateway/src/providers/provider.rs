//! Provider trait for abstracting chat-completion backends.

use serde::{Deserialize, Serialize};

use ragline_core::{ChatMessage, UsageInfo};

/// Unified response type across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: String,
    pub model: String,
    /// Text of the first choice, if the model returned any
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No content in response")]
    NoContent,
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl ProviderError {
    /// Rate limits, server errors and timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::HttpError(err) => err.is_timeout(),
            ProviderError::ApiError { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Provider trait for different LLM backends
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Send role-tagged messages and get the model's reply
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError>;

    /// Clone the provider (boxed)
    fn clone_box(&self) -> Box<dyn Provider>;
}

impl Clone for Box<dyn Provider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Extract non-blank text content from a response
pub fn extract_text(response: &ProviderResponse) -> Option<&str> {
    response
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: Option<&str>) -> ProviderResponse {
        ProviderResponse {
            id: "chatcmpl-001".to_string(),
            model: "test-model".to_string(),
            text: text.map(str::to_string),
            usage: Some(UsageInfo {
                input_tokens: 10,
                output_tokens: 5,
            }),
            stop_reason: Some("stop".to_string()),
        }
    }

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(&response(Some("Hello, world!"))), Some("Hello, world!"));
        assert_eq!(extract_text(&response(Some("  \n"))), None);
        assert_eq!(extract_text(&response(None)), None);
    }

    #[test]
    fn test_retryable_statuses() {
        let api = |status| ProviderError::ApiError {
            status,
            message: String::new(),
        };
        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!ProviderError::NoContent.is_retryable());
        assert!(!ProviderError::InvalidFormat("bad".into()).is_retryable());
    }
}
