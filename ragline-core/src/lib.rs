pub mod config;
pub mod message;

// Config re-exports
pub use config::{
    Config, ConfigError, KnowledgeSettings, LoggingSettings, ModelSettings, PromptSettings,
    RetrievalSettings, Secrets, SecretsError, Settings, SettingsError, load_dotenv,
};

// Message re-exports
pub use message::{ChatMessage, MessageRole, UsageInfo};
