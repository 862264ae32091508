//! Keyword router choosing between retrieval and direct answers.

use serde::{Deserialize, Serialize};

use crate::KnowledgeSettings;

/// Branch a query is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Answer from retrieved knowledge
    Retrieval,
    /// Answer without retrieval
    Direct,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Retrieval => "retrieval",
            Route::Direct => "direct",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless substring classifier.
#[derive(Debug, Clone)]
pub struct Router {
    keywords: Vec<String>,
}

impl Router {
    /// Keywords are matched case-insensitively; blank ones are dropped
    /// since they would match every query.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn from_settings(settings: &KnowledgeSettings) -> Self {
        Self::new(&settings.route_keywords)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn route(&self, query: &str) -> Route {
        let lower = query.to_lowercase();
        if self.keywords.iter().any(|keyword| lower.contains(keyword.as_str())) {
            Route::Retrieval
        } else {
            Route::Direct
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::from_settings(&KnowledgeSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_routes_to_retrieval() {
        let router = Router::default();
        assert_eq!(router.route("What is the Eino framework?"), Route::Retrieval);
        assert_eq!(router.route("EINO 的编排能力是什么？"), Route::Retrieval);
        assert_eq!(router.route("这个框架好用吗"), Route::Retrieval);
    }

    #[test]
    fn unrelated_query_routes_direct() {
        let router = Router::default();
        assert_eq!(router.route("What's the weather today?"), Route::Direct);
        assert_eq!(router.route("今天天气怎么样？"), Route::Direct);
        assert_eq!(router.route(""), Route::Direct);
    }

    #[test]
    fn keywords_are_case_folded() {
        let router = Router::new(["Rust", "  "]);
        assert_eq!(router.keywords(), &["rust".to_string()]);
        assert_eq!(router.route("rUsT borrow checker"), Route::Retrieval);
    }

    #[test]
    fn empty_keyword_set_routes_everything_direct() {
        let router = Router::new(Vec::<String>::new());
        assert_eq!(router.route("eino"), Route::Direct);
    }

    #[test]
    fn route_labels() {
        assert_eq!(Route::Retrieval.to_string(), "retrieval");
        assert_eq!(Route::Direct.to_string(), "direct");
        assert_eq!(serde_json::to_string(&Route::Direct).unwrap(), "\"direct\"");
    }
}
