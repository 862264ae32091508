//! Write-once knowledge index.

use crate::vectorizer::TermVector;

/// One indexed document and its term vector.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeEntry {
    /// 0-based position of the document in the source corpus.
    pub position: usize,
    pub text: String,
    pub vector: TermVector,
}

impl KnowledgeEntry {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let vector = TermVector::from_text(&text);
        Self {
            position,
            text,
            vector,
        }
    }
}

/// Ordered collection of entries built once from a corpus.
///
/// There is no insert or remove: a changed corpus means building a new
/// index and swapping it in (see [`crate::engine::KnowledgeEngine::rebuild`]).
#[derive(Debug, Clone, Default)]
pub struct KnowledgeIndex {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeIndex {
    /// Index every document in input order. Never fails: empty documents
    /// get an empty vector and can never be retrieved.
    pub fn build<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = documents
            .into_iter()
            .enumerate()
            .map(|(position, text)| KnowledgeEntry::new(position, text))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }
}
