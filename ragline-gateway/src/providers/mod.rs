pub mod openai_compatible;
pub mod provider;

pub use provider::{Provider, ProviderError, ProviderResponse, extract_text};
