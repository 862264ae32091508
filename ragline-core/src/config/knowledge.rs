//! Knowledge system configuration types.
//!
//! These types define the resolved (non-optional) settings used by
//! `ragline-knowledge`. They are created from the user-facing
//! `RetrievalSettings` TOML struct via `From`.

use serde::{Deserialize, Serialize};

use super::settings::RetrievalSettings;

/// Resolved knowledge settings (all values filled with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_route_keywords")]
    pub route_keywords: Vec<String>,
    #[serde(default = "default_no_context_placeholder")]
    pub no_context_placeholder: String,
    #[serde(default = "default_documents")]
    pub documents: Vec<String>,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            route_keywords: default_route_keywords(),
            no_context_placeholder: default_no_context_placeholder(),
            documents: default_documents(),
        }
    }
}

fn default_top_k() -> usize {
    2
}

fn default_route_keywords() -> Vec<String> {
    vec!["eino".to_string(), "框架".to_string()]
}

fn default_no_context_placeholder() -> String {
    "（未检索到相关知识）".to_string()
}

fn default_documents() -> Vec<String> {
    [
        "Eino 是字节跳动开源的通用 AI 应用开发框架。",
        "Eino 的 Stream 模式是通过 HTTP SSE（Server-Sent Events） 实现的，模型生成的每个 token 会被实时推送到客户端。",
        "Eino 提供了 Memory（记忆）、RAG（检索增强）、Tool（工具调用）等模块，帮助开发者快速构建智能体。",
        "Eino orchestration 能够用图编排的方式拼装节点，使复杂流程可视化、可复用。",
    ]
    .iter()
    .map(|doc| doc.to_string())
    .collect()
}

impl From<&RetrievalSettings> for KnowledgeSettings {
    fn from(value: &RetrievalSettings) -> Self {
        let mut settings = KnowledgeSettings::default();
        if let Some(top_k) = value.top_k {
            settings.top_k = top_k;
        }
        if let Some(keywords) = &value.route_keywords {
            settings.route_keywords = keywords.clone();
        }
        if let Some(placeholder) = &value.no_context_placeholder {
            settings.no_context_placeholder = placeholder.clone();
        }
        if let Some(documents) = &value.documents {
            settings.documents = documents.clone();
        }
        settings
    }
}
