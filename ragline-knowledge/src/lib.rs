//! Lexical retrieval for ragline: tokenizing, term-frequency vectors,
//! cosine ranking, keyword routing and context formatting.

pub mod context;
pub mod engine;
pub mod errors;
pub mod index;
pub mod retriever;
pub mod router;
pub mod similarity;
pub mod sources;
pub mod tokenizer;
pub mod vectorizer;

pub use context::{AssembledContext, assemble_context, format_context};
pub use engine::{KnowledgeEngine, SearchHit};
pub use errors::{KnowledgeError, KnowledgeResult};
pub use index::{KnowledgeEntry, KnowledgeIndex};
pub use ragline_core::config::KnowledgeSettings;
pub use retriever::{ScoredEntry, rank, retrieve, retrieve_scored};
pub use router::{Route, Router};
pub use similarity::cosine;
pub use sources::{load_documents, parse_documents};
pub use tokenizer::tokenize;
pub use vectorizer::{TermVector, vectorize};
