//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/ragline/config.toml).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# ragline configuration file
# Located at: ~/.config/ragline/config.toml
#
# This file contains non-sensitive configuration.
# Secrets are loaded from environment variables:
#   - ARK_API_KEY
#   - ARK_BASE_URL (overrides [model].base_url)
#   - ARK_MODEL or ARK_MODEL_DEFAULT (overrides [model].model)

[model]
base_url = "https://ark.cn-beijing.volces.com/api/v3"
# model = "your-endpoint-or-model-id"
timeout_seconds = 120
max_tokens = 4096
max_retries = 2
retry_backoff_ms = 500

[knowledge]
top_k = 2
route_keywords = ["eino", "框架"]
# no_context_placeholder = "（未检索到相关知识）"
# documents = ["one document per entry"]

[prompts]
# rag_instruction = "..."
# context_header = "相关知识："
# chat_instruction = "..."

[logging]
level = "info"
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Generation endpoint configuration
    #[serde(default)]
    pub model: ModelSettings,

    /// Knowledge index and retrieval configuration
    #[serde(default)]
    pub knowledge: RetrievalSettings,

    /// Prompt templates
    #[serde(default)]
    pub prompts: PromptSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Generation endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelSettings {
    /// OpenAI-compatible base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model or endpoint identifier
    #[serde(default)]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum completion tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Retries after a retryable provider failure (429, 5xx, timeout)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Linear backoff step between retries in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// User-facing knowledge settings. Unset values fall back to the
/// defaults in [`super::KnowledgeSettings`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RetrievalSettings {
    /// Number of entries retrieved per query
    pub top_k: Option<usize>,

    /// Substrings that send a query down the retrieval branch
    pub route_keywords: Option<Vec<String>>,

    /// Context text used when nothing relevant was retrieved
    pub no_context_placeholder: Option<String>,

    /// Inline corpus, one document per entry
    pub documents: Option<Vec<String>>,
}

/// Prompt templates sent to the generation model
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptSettings {
    /// System instruction for answers grounded in retrieved knowledge
    #[serde(default = "default_rag_instruction")]
    pub rag_instruction: String,

    /// Header placed above the numbered context block
    #[serde(default = "default_context_header")]
    pub context_header: String,

    /// System instruction for direct answers
    #[serde(default = "default_chat_instruction")]
    pub chat_instruction: String,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_base_url() -> String {
    "https://ark.cn-beijing.volces.com/api/v3".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_rag_instruction() -> String {
    "你是一个知识助手，请结合提供的知识回答问题，回答时引用知识条目编号。如果知识不足以回答，请直接说明不知道。"
        .to_string()
}

fn default_context_header() -> String {
    "相关知识：".to_string()
}

fn default_chat_instruction() -> String {
    "你是一个通用的智能助手，以简洁方式回答用户问题。".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: String::new(),
            timeout_seconds: default_timeout_seconds(),
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            rag_instruction: default_rag_instruction(),
            context_header: default_context_header(),
            chat_instruction: default_chat_instruction(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// `RAGLINE_CONFIG_DIR` wins over the XDG config directory.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("RAGLINE_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("ragline");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }
}
