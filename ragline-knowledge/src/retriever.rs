//! Top-K retrieval by cosine similarity.

use crate::index::{KnowledgeEntry, KnowledgeIndex};
use crate::similarity::cosine;
use crate::vectorizer::TermVector;

/// An index entry paired with its similarity to one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry<'a> {
    pub entry: &'a KnowledgeEntry,
    pub score: f64,
}

/// Score every entry against `query`, best first.
///
/// The sort is stable, so entries with equal scores keep index order.
pub fn rank<'a>(index: &'a KnowledgeIndex, query: &str) -> Vec<ScoredEntry<'a>> {
    let query_vector = TermVector::from_text(query);
    let mut scored: Vec<ScoredEntry<'a>> = index
        .iter()
        .map(|entry| ScoredEntry {
            entry,
            score: cosine(&query_vector, &entry.vector),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Up to `k` best entries with a strictly positive score, with their scores.
pub fn retrieve_scored<'a>(
    index: &'a KnowledgeIndex,
    query: &str,
    k: usize,
) -> Vec<ScoredEntry<'a>> {
    if k == 0 || index.is_empty() {
        return Vec::new();
    }

    rank(index, query)
        .into_iter()
        .take(k)
        .take_while(|candidate| candidate.score > 0.0)
        .collect()
}

/// Up to `k` best entries for `query`.
///
/// Ranking stops at the first entry scoring `<= 0`, so a query sharing no
/// token with the corpus returns nothing rather than unrelated context.
pub fn retrieve<'a>(index: &'a KnowledgeIndex, query: &str, k: usize) -> Vec<&'a KnowledgeEntry> {
    retrieve_scored(index, query, k)
        .into_iter()
        .map(|candidate| candidate.entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets_index() -> KnowledgeIndex {
        KnowledgeIndex::build(["the cat sat", "the dog ran", "cats and dogs are pets"])
    }

    #[test]
    fn exact_token_overlap_wins() {
        let index = pets_index();
        let results = retrieve(&index, "cat", 2);
        // "cats" is a different token, so only the first document matches
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "the cat sat");
    }

    #[test]
    fn shared_stop_word_ranks_by_score() {
        let index = pets_index();
        let results = retrieve_scored(&index, "the cat", 3);
        let texts: Vec<&str> = results.iter().map(|c| c.entry.text.as_str()).collect();
        assert_eq!(texts, vec!["the cat sat", "the dog ran"]);
        assert!(results[0].score > results[1].score);
        assert!(results.iter().all(|c| c.score > 0.0));
    }

    #[test]
    fn k_zero_returns_nothing() {
        assert!(retrieve(&pets_index(), "cat", 0).is_empty());
    }

    #[test]
    fn k_is_clamped_to_index_size() {
        let index = pets_index();
        let results = retrieve(&index, "the", 100);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn no_overlap_returns_nothing_regardless_of_k() {
        let index = pets_index();
        for k in [1, 2, 3, 10] {
            assert!(retrieve(&index, "quantum chromodynamics", k).is_empty());
        }
        assert!(retrieve(&index, "", 3).is_empty());
    }

    #[test]
    fn ties_keep_index_order() {
        let index = KnowledgeIndex::build(["alpha beta", "gamma", "alpha beta", "alpha beta"]);
        let results = retrieve(&index, "alpha", 3);
        let positions: Vec<usize> = results.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[test]
    fn rank_covers_whole_index() {
        let index = pets_index();
        let ranked = rank(&index, "dog");
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].entry.text, "the dog ran");
        // Zero-score entries follow in index order
        assert_eq!(ranked[1].entry.position, 0);
        assert_eq!(ranked[2].entry.position, 2);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn empty_documents_are_never_retrieved() {
        let index = KnowledgeIndex::build(["", "real text", "。"]);
        let results = retrieve(&index, "real", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].position, 1);
    }
}
