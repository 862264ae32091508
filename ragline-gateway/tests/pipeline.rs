//! Pipeline dispatch and retry behaviour against a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ragline_core::{ChatMessage, MessageRole, PromptSettings};
use ragline_gateway::{
    PipelineError, Provider, ProviderError, ProviderResponse, RagPipeline, RetryPolicy,
};
use ragline_knowledge::{KnowledgeEngine, KnowledgeSettings, Route};

#[derive(Debug, Clone)]
enum Reply {
    Text(&'static str),
    Empty,
    Status(u16),
}

/// Provider that replays scripted replies and records every request.
#[derive(Clone, Default)]
struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedProvider {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Text("default"));

        let text = match reply {
            Reply::Text(text) => Some(text.to_string()),
            Reply::Empty => None,
            Reply::Status(status) => {
                return Err(ProviderError::ApiError {
                    status,
                    message: format!("scripted {status}"),
                });
            }
        };

        Ok(ProviderResponse {
            id: "scripted-1".to_string(),
            model: "scripted-model".to_string(),
            text,
            usage: None,
            stop_reason: Some("stop".to_string()),
        })
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}

fn pipeline(provider: &ScriptedProvider, retry: RetryPolicy) -> RagPipeline {
    let engine = Arc::new(KnowledgeEngine::new(KnowledgeSettings::default()));
    RagPipeline::new(engine, provider.clone_box(), PromptSettings::default()).with_retry(retry)
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::ZERO)
}

// ── dispatch ─────────────────────────────────────────────────────────

#[tokio::test]
async fn eino_query_goes_through_retrieval() {
    let provider = ScriptedProvider::new([Reply::Text("Eino 支持图编排。")]);
    let answer = pipeline(&provider, RetryPolicy::none())
        .answer("Eino 的编排能力是什么？")
        .await
        .unwrap();

    assert_eq!(answer.route, Route::Retrieval);
    assert_eq!(answer.cited, 2);
    assert_eq!(answer.content, "Eino 支持图编排。");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let roles: Vec<MessageRole> = requests[0].iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::System, MessageRole::System, MessageRole::User]
    );
    assert!(requests[0][1].content.starts_with("相关知识：\n1. "));
    assert_eq!(requests[0][2].content, "Eino 的编排能力是什么？");
}

#[tokio::test]
async fn weather_query_goes_direct() {
    let provider = ScriptedProvider::new([Reply::Text("我无法获取实时天气。")]);
    let answer = pipeline(&provider, RetryPolicy::none())
        .answer("今天天气怎么样？")
        .await
        .unwrap();

    assert_eq!(answer.route, Route::Direct);
    assert!(answer.context.is_none());
    assert_eq!(answer.cited, 0);

    let requests = provider.requests();
    assert_eq!(requests[0].len(), 2);
    assert_eq!(requests[0][1], ChatMessage::user("今天天气怎么样？"));
}

#[tokio::test]
async fn forced_retrieval_uses_placeholder_when_nothing_matches() {
    let provider = ScriptedProvider::new([Reply::Text("不知道。")]);
    let answer = pipeline(&provider, RetryPolicy::none())
        .answer_with_knowledge("quantum chromodynamics")
        .await
        .unwrap();

    assert_eq!(answer.route, Route::Retrieval);
    assert_eq!(answer.cited, 0);
    assert_eq!(answer.context.as_deref(), Some("（未检索到相关知识）"));
    assert_eq!(
        provider.requests()[0][1].content,
        "相关知识：\n（未检索到相关知识）"
    );
}

// ── retries ──────────────────────────────────────────────────────────

#[tokio::test]
async fn retryable_errors_are_retried() {
    let provider = ScriptedProvider::new([
        Reply::Status(429),
        Reply::Status(503),
        Reply::Text("ok"),
    ]);
    let answer = pipeline(&provider, fast_retry(2))
        .answer_directly("hello")
        .await
        .unwrap();

    assert_eq!(answer.content, "ok");
    assert_eq!(provider.requests().len(), 3);
}

#[tokio::test]
async fn retry_budget_is_respected() {
    let provider = ScriptedProvider::new([
        Reply::Status(500),
        Reply::Status(500),
        Reply::Text("too late"),
    ]);
    let err = pipeline(&provider, fast_retry(1))
        .answer_directly("hello")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Provider(ProviderError::ApiError { status: 500, .. })
    ));
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let provider = ScriptedProvider::new([Reply::Status(401), Reply::Text("unused")]);
    let err = pipeline(&provider, fast_retry(3))
        .answer_directly("hello")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Provider(ProviderError::ApiError { status: 401, .. })
    ));
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn empty_reply_is_no_content() {
    let provider = ScriptedProvider::new([Reply::Empty]);
    let err = pipeline(&provider, fast_retry(3))
        .answer_directly("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Provider(ProviderError::NoContent)));
    assert_eq!(provider.requests().len(), 1);
}

// ── batches ──────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_query_does_not_stop_the_batch() {
    let provider = ScriptedProvider::new([Reply::Status(401), Reply::Text("晴天。")]);
    let answers = pipeline(&provider, fast_retry(2))
        .answer_all(&["Eino 的编排能力是什么？", "今天天气怎么样？"])
        .await;

    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].query, "今天天气怎么样？");
    assert_eq!(answers[0].route, Route::Direct);
    assert_eq!(answers[0].content, "晴天。");
    assert_eq!(provider.requests().len(), 2);
}
