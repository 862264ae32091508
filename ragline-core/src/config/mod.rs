//! Configuration management for ragline.
//!
//! Secrets come from environment variables, settings from a TOML file.
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `ARK_API_KEY` - API key for the chat-completions endpoint
//! - `ARK_BASE_URL` - endpoint base URL (overrides `[model].base_url`)
//! - `ARK_MODEL` / `ARK_MODEL_DEFAULT` - model id (overrides `[model].model`)
//!
//! ## Settings (TOML File)
//! Located at `~/.config/ragline/config.toml`:
//! ```toml
//! [model]
//! base_url = "https://ark.cn-beijing.volces.com/api/v3"
//! model = "doubao-seed-1-6"
//!
//! [knowledge]
//! top_k = 2
//! route_keywords = ["eino", "框架"]
//!
//! [logging]
//! level = "info"
//! ```

pub mod knowledge;
mod secrets;
mod settings;

pub use knowledge::KnowledgeSettings;
pub use secrets::{Secrets, SecretsError};
pub use settings::{
    LoggingSettings, ModelSettings, PromptSettings, RetrievalSettings, Settings, SettingsError,
};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file, with env overrides applied
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Model base URL is not set (set ARK_BASE_URL or [model].base_url)")]
    BaseUrlNotSet,

    #[error("Model id is not set (set ARK_MODEL or [model].model)")]
    ModelNotSet,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Generation-specific values are validated separately by
    /// [`Config::require_generation`], so retrieval-only commands work
    /// without an API key.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env();
        let settings = Settings::load()?;
        Ok(Self::from_parts(secrets, settings))
    }

    /// Combine secrets and settings, letting env values override the file.
    pub fn from_parts(secrets: Secrets, mut settings: Settings) -> Self {
        if let Some(base_url) = &secrets.base_url {
            settings.model.base_url = base_url.clone();
        }
        if let Some(model) = &secrets.model {
            settings.model.model = model.clone();
        }
        Self { secrets, settings }
    }

    /// Check that everything needed to call the generation model is present.
    pub fn require_generation(&self) -> Result<(), ConfigError> {
        self.secrets.require_api_key()?;
        if self.settings.model.base_url.trim().is_empty() {
            return Err(ConfigError::BaseUrlNotSet);
        }
        if self.settings.model.model.trim().is_empty() {
            return Err(ConfigError::ModelNotSet);
        }
        Ok(())
    }

    /// Resolved knowledge settings.
    pub fn knowledge_settings(&self) -> KnowledgeSettings {
        KnowledgeSettings::from(&self.settings.knowledge)
    }

    /// Get the API key (if configured).
    pub fn api_key(&self) -> Option<&str> {
        self.secrets.api_key.as_deref()
    }

    /// Get the effective model base URL.
    pub fn base_url(&self) -> &str {
        &self.settings.model.base_url
    }

    /// Get the effective model identifier.
    pub fn model_id(&self) -> &str {
        &self.settings.model.model
    }
}

/// Load .env file if it exists (for development convenience).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
