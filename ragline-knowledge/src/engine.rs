use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::KnowledgeSettings;
use crate::context::{AssembledContext, assemble_context};
use crate::index::{KnowledgeEntry, KnowledgeIndex};
use crate::retriever::retrieve_scored;
use crate::router::{Route, Router};

/// A retrieval result detached from the index snapshot it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: usize,
    pub text: String,
    pub score: f64,
}

/// Shared retrieval front-end: router plus a swappable index snapshot.
///
/// Readers clone the current `Arc<KnowledgeIndex>` and work on it without
/// holding the lock. [`KnowledgeEngine::rebuild`] builds the new index
/// first and only then publishes it, so a reader sees either the old or
/// the new corpus, never a mix.
#[derive(Debug)]
pub struct KnowledgeEngine {
    settings: KnowledgeSettings,
    router: Router,
    index: RwLock<Arc<KnowledgeIndex>>,
}

impl KnowledgeEngine {
    /// Build an engine over the documents configured in `settings`.
    pub fn new(settings: KnowledgeSettings) -> Self {
        let documents = settings.documents.clone();
        Self::with_documents(settings, documents)
    }

    /// Build an engine over an explicit corpus, ignoring `settings.documents`.
    pub fn with_documents<I, S>(settings: KnowledgeSettings, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = KnowledgeIndex::build(documents);
        info!(documents = index.len(), "knowledge index built");
        let router = Router::from_settings(&settings);
        Self {
            settings,
            router,
            index: RwLock::new(Arc::new(index)),
        }
    }

    /// Access the knowledge settings.
    pub fn settings(&self) -> &KnowledgeSettings {
        &self.settings
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Current index snapshot.
    pub fn snapshot(&self) -> Arc<KnowledgeIndex> {
        let guard = self.index.read().unwrap_or_else(|p| p.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the corpus. Returns the number of indexed documents.
    pub fn rebuild<I, S>(&self, documents: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fresh = Arc::new(KnowledgeIndex::build(documents));
        let count = fresh.len();
        let mut guard = self.index.write().unwrap_or_else(|p| p.into_inner());
        *guard = fresh;
        info!(documents = count, "knowledge index rebuilt");
        count
    }

    pub fn route(&self, query: &str) -> Route {
        let route = self.router.route(query);
        debug!(route = %route, "routed query");
        route
    }

    /// Up to `k` entries for `query`; `None` uses the configured `top_k`.
    pub fn retrieve(&self, query: &str, k: Option<usize>) -> Vec<KnowledgeEntry> {
        let index = self.snapshot();
        let k = k.unwrap_or(self.settings.top_k);
        let hits: Vec<KnowledgeEntry> = retrieve_scored(&index, query, k)
            .into_iter()
            .map(|candidate| candidate.entry.clone())
            .collect();
        debug!(k, hits = hits.len(), "retrieved knowledge");
        hits
    }

    /// Like [`KnowledgeEngine::retrieve`], keeping the similarity scores.
    pub fn search(&self, query: &str, k: Option<usize>) -> Vec<SearchHit> {
        let index = self.snapshot();
        let k = k.unwrap_or(self.settings.top_k);
        retrieve_scored(&index, query, k)
            .into_iter()
            .map(|candidate| SearchHit {
                position: candidate.entry.position,
                text: candidate.entry.text.clone(),
                score: candidate.score,
            })
            .collect()
    }

    /// Retrieve with the configured `top_k` and format the result, falling
    /// back to the configured placeholder when nothing matches.
    pub fn context_for(&self, query: &str) -> AssembledContext {
        let entries = self.retrieve(query, None);
        assemble_context(&entries, &self.settings.no_context_placeholder)
    }
}
