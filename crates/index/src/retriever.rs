//! The Retriever implementation backed by the persisted vector store.

use crate::store::VectorStore;
use async_trait::async_trait;
use docsage_core::error::RetrievalError;
use docsage_core::provider::{EmbeddingRequest, Provider};
use docsage_core::retrieval::{Passage, Retriever};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Nearest-neighbor lookup over a persisted collection.
///
/// The store is opened lazily on the first search and cached, so the chatbot
/// can be constructed before an index exists; a missing index then surfaces
/// as `IndexUnavailable` on the turn that needs it, not at startup.
pub struct IndexRetriever {
    index_path: PathBuf,
    provider: Arc<dyn Provider>,
    embedding_model: String,
    store: RwLock<Option<Arc<VectorStore>>>,
}

impl IndexRetriever {
    pub fn new(
        index_path: impl Into<PathBuf>,
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            index_path: index_path.into(),
            provider,
            embedding_model: embedding_model.into(),
            store: RwLock::new(None),
        }
    }

    async fn open_store(&self) -> Result<Arc<VectorStore>, RetrievalError> {
        if let Some(store) = self.store.read().await.as_ref() {
            return Ok(Arc::clone(store));
        }

        let mut slot = self.store.write().await;
        // Another caller may have opened it while we waited for the lock.
        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(VectorStore::open(&self.index_path)?);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }
}

#[async_trait]
impl Retriever for IndexRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let store = self.open_store().await?;

        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.embedding_model.clone(),
                inputs: vec![query.to_string()],
            })
            .await
            .map_err(RetrievalError::EmbeddingFailed)?;

        let Some(query_embedding) = response.embeddings.into_iter().next() else {
            return Ok(Vec::new());
        };

        let passages: Vec<Passage> = store
            .search(&query_embedding, k)
            .into_iter()
            .map(|chunk| Passage::new(chunk.content, Some(chunk.source), chunk.page))
            .collect();

        debug!(query_len = query.len(), passages = passages.len(), "Retrieval complete");
        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IndexedChunk;
    use docsage_core::error::ProviderError;
    use docsage_core::provider::{EmbeddingResponse, ProviderRequest, ProviderResponse};

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Provider for FixedEmbedder {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            unimplemented!()
        }

        async fn embed(
            &self,
            request: EmbeddingRequest,
        ) -> Result<EmbeddingResponse, ProviderError> {
            Ok(EmbeddingResponse {
                embeddings: vec![self.0.clone(); request.inputs.len()],
                model: request.model,
                usage: None,
            })
        }
    }

    fn write_store(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("handbook.json");
        VectorStore::new(vec![
            IndexedChunk {
                id: "1".into(),
                content: "OMEdit is the GUI".into(),
                source: "guide.pdf".into(),
                page: Some(4),
                embedding: vec![1.0, 0.0],
            },
            IndexedChunk {
                id: "2".into(),
                content: "Unrelated chapter".into(),
                source: "guide.pdf".into(),
                page: Some(9),
                embedding: vec![0.0, 1.0],
            },
        ])
        .save(&path)
        .unwrap();
        path
    }

    #[tokio::test]
    async fn search_returns_ranked_passages() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path());

        let retriever =
            IndexRetriever::new(path, Arc::new(FixedEmbedder(vec![1.0, 0.0])), "stub-embed");
        let passages = retriever.search("What is OMEdit?", 1).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].content, "OMEdit is the GUI");
        assert_eq!(passages[0].source, "guide.pdf");
        assert_eq!(passages[0].page, Some(4));
    }

    #[tokio::test]
    async fn missing_index_is_unavailable() {
        let retriever = IndexRetriever::new(
            "/nonexistent/handbook.json",
            Arc::new(FixedEmbedder(vec![1.0, 0.0])),
            "stub-embed",
        );
        let err = retriever.search("anything", 3).await.unwrap_err();
        assert!(matches!(err, RetrievalError::IndexUnavailable(_)));
    }

    #[tokio::test]
    async fn store_is_cached_after_first_search() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_store(dir.path());

        let retriever = IndexRetriever::new(
            path.clone(),
            Arc::new(FixedEmbedder(vec![1.0, 0.0])),
            "stub-embed",
        );
        retriever.search("first", 1).await.unwrap();

        // Deleting the file no longer matters — the store is cached.
        std::fs::remove_file(&path).unwrap();
        let passages = retriever.search("second", 1).await.unwrap();
        assert_eq!(passages.len(), 1);
    }
}
