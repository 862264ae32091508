//! Lower-casing, punctuation-stripping whitespace tokenizer.

/// Half-width and full-width punctuation replaced by a space before splitting.
const PUNCTUATION: [char; 13] = [
    '。', '，', '、', '；', '：', '！', '？', '.', ',', ';', ':', '!', '?',
];

/// Split `text` into lower-cased tokens.
///
/// Unsegmented CJK runs stay a single token; there is no stemming or
/// stop-word removal.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}
