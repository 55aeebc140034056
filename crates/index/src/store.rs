//! The persisted embedding store.
//!
//! One collection = one JSON file holding every chunk with its embedding
//! vector. Small corpora only — search is a linear cosine scan, which is
//! plenty for a single manual.

use crate::vector::cosine_similarity;
use docsage_core::error::RetrievalError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One embedded chunk of a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    /// Unique chunk ID
    pub id: String,

    /// The chunk text
    pub content: String,

    /// Source document name (file name)
    pub source: String,

    /// 0-based page index the chunk came from, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Embedding vector
    pub embedding: Vec<f32>,
}

/// An in-memory view of one persisted collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorStore {
    chunks: Vec<IndexedChunk>,
}

impl VectorStore {
    pub fn new(chunks: Vec<IndexedChunk>) -> Self {
        Self { chunks }
    }

    /// Open a collection file.
    ///
    /// A missing or unparseable file is `IndexUnavailable` — the caller
    /// decides whether that aborts the turn (retrieval) or prompts the user
    /// to ingest (CLI startup).
    pub fn open(path: &Path) -> Result<Self, RetrievalError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::IndexUnavailable(format!("{}: {e}", path.display()))
        })?;

        let store: Self = serde_json::from_str(&content).map_err(|e| {
            RetrievalError::IndexUnavailable(format!("{} is corrupt: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            chunks = store.chunks.len(),
            "Vector store loaded"
        );
        Ok(store)
    }

    /// Persist the collection, replacing any previous file atomically
    /// (write to a temp sibling, then rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;

        info!(path = %path.display(), chunks = self.chunks.len(), "Vector store saved");
        Ok(())
    }

    /// Rank chunks by cosine similarity to the query embedding; return the
    /// top `k` in descending order.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<IndexedChunk> {
        let mut scored: Vec<(f32, &IndexedChunk)> = self
            .chunks
            .iter()
            .map(|chunk| (cosine_similarity(&chunk.embedding, query_embedding), chunk))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(results = scored.len(), "Vector search complete");
        scored.into_iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Distinct source document names in the collection.
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self.chunks.iter().map(|c| c.source.clone()).collect();
        sources.sort();
        sources.dedup();
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            id: id.into(),
            content: format!("Content for {id}"),
            source: "guide.pdf".into(),
            page: Some(0),
            embedding,
        }
    }

    #[test]
    fn search_ranks_by_similarity() {
        let store = VectorStore::new(vec![
            chunk("a", vec![0.0, 1.0, 0.0]), // orthogonal = 0
            chunk("b", vec![1.0, 0.0, 0.0]), // identical = 1
            chunk("c", vec![0.5, 0.5, 0.0]), // partial = ~0.707
        ]);

        let results = store.search(&[1.0, 0.0, 0.0], 10);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "b");
        assert_eq!(results[1].id, "c");
        assert_eq!(results[2].id, "a");
    }

    #[test]
    fn search_respects_k() {
        let store = VectorStore::new(
            (0..10)
                .map(|i| chunk(&format!("c{i}"), vec![1.0, i as f32 * 0.1]))
                .collect(),
        );

        let results = store.search(&[1.0, 0.0], 3);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn search_empty_store() {
        let store = VectorStore::default();
        assert!(store.search(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn save_and_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handbook.json");

        let store = VectorStore::new(vec![chunk("a", vec![1.0, 0.0])]);
        store.save(&path).unwrap();

        let reopened = VectorStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.search(&[1.0, 0.0], 1)[0].id, "a");
    }

    #[test]
    fn open_missing_file_is_unavailable() {
        let err = VectorStore::open(Path::new("/nonexistent/handbook.json")).unwrap_err();
        assert!(matches!(err, RetrievalError::IndexUnavailable(_)));
    }

    #[test]
    fn open_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handbook.json");
        std::fs::write(&path, "not json {").unwrap();

        let err = VectorStore::open(&path).unwrap_err();
        assert!(matches!(err, RetrievalError::IndexUnavailable(_)));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("handbook.json");

        VectorStore::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn sources_deduplicated_and_sorted() {
        let mut chunks = vec![chunk("a", vec![1.0]), chunk("b", vec![1.0])];
        chunks.push(IndexedChunk {
            source: "appendix.pdf".into(),
            ..chunk("c", vec![1.0])
        });
        let store = VectorStore::new(chunks);

        assert_eq!(store.sources(), vec!["appendix.pdf", "guide.pdf"]);
    }
}
