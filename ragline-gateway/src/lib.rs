pub mod pipeline;
pub mod prompt;
pub mod providers;

pub use pipeline::{PipelineAnswer, PipelineError, RagPipeline, RetryPolicy};
pub use providers::openai_compatible::OpenAiCompatibleClient;
pub use providers::provider::{Provider, ProviderError, ProviderResponse, extract_text};
