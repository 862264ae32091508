use crate::vectorizer::TermVector;

/// Cosine similarity between two term vectors.
///
/// The dot product runs over shared terms; each norm covers its own
/// vector's full term set. Empty or zero-norm input scores exactly `0.0`.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (term, weight) in a.iter() {
        norm_a += weight * weight;
        if let Some(other) = b.get(term) {
            dot += weight * other;
        }
    }
    let norm_b: f64 = b.values().map(|w| w * w).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
