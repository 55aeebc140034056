//! Retriever trait — the abstraction over nearest-neighbor passage lookup.
//!
//! The answering stage asks a `Retriever` for the top-k passages matching a
//! standalone search query. How those passages were embedded and stored is
//! the implementation's business (see the index crate).

use crate::error::RetrievalError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fallback source label for passages whose document metadata is missing.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// A retrieved unit of text with source metadata. Immutable; produced by a
/// `Retriever`, consumed once per answering call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text.
    pub content: String,

    /// Document identifier (file name). `UNKNOWN_SOURCE` when absent.
    pub source: String,

    /// 0-based page index in the source document, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Passage {
    /// Build a passage, substituting the unknown-source label when the
    /// document metadata carries no identifier.
    pub fn new(content: impl Into<String>, source: Option<String>, page: Option<u32>) -> Self {
        Self {
            content: content.into(),
            source: source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            page,
        }
    }
}

/// Nearest-neighbor lookup over a vector index.
///
/// `search` returns up to `k` passages ordered by relevance; an empty result
/// is valid (nothing matched). A missing or corrupt backing store fails with
/// `RetrievalError::IndexUnavailable`.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> std::result::Result<Vec<Passage>, RetrievalError>;
}
