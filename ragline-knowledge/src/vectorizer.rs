//! Relative term-frequency vectors.

use std::collections::BTreeMap;

use crate::tokenizer::tokenize;

/// Sparse token → relative frequency mapping.
///
/// Values are counts divided by the total token count of the source text,
/// so a non-empty vector sums to 1.0. Keys are kept sorted, which makes
/// similarity sums independent of argument order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    /// Tokenize and vectorize `text` in one step.
    pub fn from_text(text: &str) -> Self {
        vectorize(&tokenize(text))
    }

    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, weight)| (term.as_str(), *weight))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.values().copied()
    }

    /// Euclidean norm over every term in this vector.
    pub fn norm(&self) -> f64 {
        self.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

/// Count each distinct token and divide by the total token count.
pub fn vectorize<S: AsRef<str>>(tokens: &[S]) -> TermVector {
    if tokens.is_empty() {
        return TermVector::default();
    }

    let mut weights: BTreeMap<String, f64> = BTreeMap::new();
    for token in tokens {
        *weights.entry(token.as_ref().to_string()).or_insert(0.0) += 1.0;
    }

    let total = tokens.len() as f64;
    for weight in weights.values_mut() {
        *weight /= total;
    }

    TermVector { weights }
}
