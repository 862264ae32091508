//! Secrets configuration loaded from environment variables only.
//!
//! The API key for the generation endpoint never lives in the TOML file.
//! Endpoint and model identifiers are also accepted from the environment so
//! a bare `ARK_*` shell setup works without any config file.

use std::env;

/// Secrets loaded exclusively from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Model API key (env: ARK_API_KEY)
    pub api_key: Option<String>,

    /// Chat-completions base URL (env: ARK_BASE_URL)
    pub base_url: Option<String>,

    /// Model identifier (env: ARK_MODEL, falling back to ARK_MODEL_DEFAULT)
    pub model: Option<String>,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Missing required secret: {0}")]
    MissingSecret(String),
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// Loads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Self {
        Self {
            api_key: non_empty_var("ARK_API_KEY"),
            base_url: non_empty_var("ARK_BASE_URL"),
            model: non_empty_var("ARK_MODEL").or_else(|| non_empty_var("ARK_MODEL_DEFAULT")),
        }
    }

    /// The API key, or an error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&str, SecretsError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SecretsError::MissingSecret("ARK_API_KEY".to_string()))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
