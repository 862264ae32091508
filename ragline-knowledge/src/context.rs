//! Numbered context blocks handed to the model.

use std::borrow::Borrow;

use crate::index::KnowledgeEntry;

/// Context text plus how many knowledge entries it cites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub text: String,
    pub cited: usize,
}

impl AssembledContext {
    pub fn is_empty(&self) -> bool {
        self.cited == 0
    }
}

/// Render entries as `"{i}. {text}\n"` lines, numbered from 1.
///
/// Returns an empty string for no entries.
pub fn format_context<E: Borrow<KnowledgeEntry>>(entries: &[E]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}\n", i + 1, entry.borrow().text))
        .collect()
}

/// Like [`format_context`], but falls back to `placeholder` when nothing
/// was retrieved so the prompt never carries an empty knowledge block.
pub fn assemble_context<E: Borrow<KnowledgeEntry>>(
    entries: &[E],
    placeholder: &str,
) -> AssembledContext {
    if entries.is_empty() {
        return AssembledContext {
            text: placeholder.to_string(),
            cited: 0,
        };
    }

    AssembledContext {
        text: format_context(entries),
        cited: entries.len(),
    }
}
