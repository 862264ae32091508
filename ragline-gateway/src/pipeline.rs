//! Route-then-answer pipeline over the knowledge engine and a provider.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use ragline_core::{ChatMessage, ConfigError, ModelSettings, PromptSettings};
use ragline_knowledge::{KnowledgeEngine, KnowledgeError, Route};

use crate::prompt::{direct_messages, retrieval_messages};
use crate::providers::{Provider, ProviderError, extract_text};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),
}

/// Retry budget for provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self::new(
            settings.max_retries,
            Duration::from_millis(settings.retry_backoff_ms),
        )
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&ModelSettings::default())
    }
}

/// One answered query.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineAnswer {
    pub route: Route,
    pub query: String,
    /// Context block sent to the model; `None` on the direct branch
    pub context: Option<String>,
    /// Knowledge entries cited in the context
    pub cited: usize,
    pub content: String,
}

pub struct RagPipeline {
    engine: Arc<KnowledgeEngine>,
    provider: Box<dyn Provider>,
    prompts: PromptSettings,
    retry: RetryPolicy,
}

impl RagPipeline {
    pub fn new(
        engine: Arc<KnowledgeEngine>,
        provider: Box<dyn Provider>,
        prompts: PromptSettings,
    ) -> Self {
        Self {
            engine,
            provider,
            prompts,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn engine(&self) -> &KnowledgeEngine {
        &self.engine
    }

    /// Route `query` and answer it on the chosen branch.
    pub async fn answer(&self, query: &str) -> Result<PipelineAnswer, PipelineError> {
        let route = self.engine.route(query);
        info!(route = %route, "answering query");
        match route {
            Route::Retrieval => self.answer_with_knowledge(query).await,
            Route::Direct => self.answer_directly(query).await,
        }
    }

    /// Answer from retrieved knowledge regardless of routing.
    pub async fn answer_with_knowledge(&self, query: &str) -> Result<PipelineAnswer, PipelineError> {
        let context = self.engine.context_for(query);
        info!(cited = context.cited, "assembled knowledge context");

        let messages = retrieval_messages(&self.prompts, &context.text, query);
        let content = self.complete(&messages).await?;

        Ok(PipelineAnswer {
            route: Route::Retrieval,
            query: query.to_string(),
            context: Some(context.text),
            cited: context.cited,
            content,
        })
    }

    pub async fn answer_directly(&self, query: &str) -> Result<PipelineAnswer, PipelineError> {
        let messages = direct_messages(&self.prompts, query);
        let content = self.complete(&messages).await?;

        Ok(PipelineAnswer {
            route: Route::Direct,
            query: query.to_string(),
            context: None,
            cited: 0,
            content,
        })
    }

    /// Answer each query in turn. A failed query is logged and skipped.
    pub async fn answer_all<S: AsRef<str>>(&self, queries: &[S]) -> Vec<PipelineAnswer> {
        let mut answers = Vec::with_capacity(queries.len());
        for query in queries {
            let query = query.as_ref();
            match self.answer(query).await {
                Ok(answer) => answers.push(answer),
                Err(e) => error!("Failed to answer {:?}: {}", query, e),
            }
        }
        answers
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            let result = self.provider.complete(messages).await.and_then(|response| {
                extract_text(&response)
                    .map(str::to_string)
                    .ok_or(ProviderError::NoContent)
            });

            match result {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        provider = %self.provider.name(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying completion: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
