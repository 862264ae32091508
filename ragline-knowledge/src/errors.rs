use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document source not found: {0}")]
    MissingSource(PathBuf),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
