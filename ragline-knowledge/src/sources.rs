//! Loading a document corpus from disk.

use std::path::Path;

use tracing::info;

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Split file content into documents: one per non-blank line, trimmed.
pub fn parse_documents(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a newline-delimited corpus file.
pub async fn load_documents(path: &Path) -> KnowledgeResult<Vec<String>> {
    if !tokio::fs::try_exists(path).await? {
        return Err(KnowledgeError::MissingSource(path.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let documents = parse_documents(&content);
    info!(path = %path.display(), documents = documents.len(), "loaded documents");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        let docs = parse_documents("  first  \n\n\t\nsecond\r\nthird");
        assert_eq!(docs, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_content_has_no_documents() {
        assert!(parse_documents("").is_empty());
        assert!(parse_documents("\n \n").is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.txt");
        std::fs::write(&path, "Eino 是框架。\n\nStream 基于 SSE。\n").unwrap();

        let docs = load_documents(&path).await.unwrap();
        assert_eq!(docs, vec!["Eino 是框架。", "Stream 基于 SSE。"]);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_documents(&path).await.unwrap_err();
        assert!(matches!(err, KnowledgeError::MissingSource(p) if p == path));
    }
}
