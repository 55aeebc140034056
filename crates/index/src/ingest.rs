//! Ingestion pipeline: PDF → pages → chunks → embeddings → persisted store.

use crate::loader::load_pdf;
use crate::splitter::chunk_text;
use crate::store::{IndexedChunk, VectorStore};
use docsage_core::error::ProviderError;
use docsage_core::provider::{EmbeddingRequest, Provider};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Embedding API batch size (inputs per request).
const EMBED_BATCH: usize = 64;

/// Errors from the ingestion pipeline. All fatal — a partial index is never
/// written.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("PDF loading failed: {0}")]
    Pdf(String),

    #[error("Text splitting failed: {0}")]
    Split(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] ProviderError),

    #[error("Index write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of one ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    pub pages: usize,
    pub chunks: usize,
}

/// Builds a vector store from source documents.
pub struct Ingestor {
    provider: Arc<dyn Provider>,
    embedding_model: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Ingestor {
    pub fn new(
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            provider,
            embedding_model: embedding_model.into(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Ingest one PDF into the collection at `index_path`, replacing any
    /// previous contents.
    pub async fn ingest_pdf(
        &self,
        pdf_path: &Path,
        index_path: &Path,
    ) -> Result<IngestReport, IngestError> {
        let source = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| pdf_path.display().to_string());

        info!(source = %source, "Ingesting document");
        let pages = load_pdf(pdf_path)?;
        let page_count = pages.len();

        // Chunk per page so every chunk keeps its page provenance.
        let mut texts = Vec::new();
        let mut provenance = Vec::new();
        for page in &pages {
            for chunk in chunk_text(&page.text, self.chunk_size, self.chunk_overlap)? {
                texts.push(chunk);
                provenance.push(page.page);
            }
        }

        info!(pages = page_count, chunks = texts.len(), "Embedding chunks");
        let embeddings = self.embed_all(&texts).await?;

        let chunks: Vec<IndexedChunk> = texts
            .into_iter()
            .zip(provenance)
            .zip(embeddings)
            .map(|((content, page), embedding)| IndexedChunk {
                id: Uuid::new_v4().to_string(),
                content,
                source: source.clone(),
                page: Some(page),
                embedding,
            })
            .collect();

        let report = IngestReport {
            pages: page_count,
            chunks: chunks.len(),
        };

        VectorStore::new(chunks).save(index_path)?;
        Ok(report)
    }

    /// Embed every text, batching requests to stay under API input limits.
    async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, IngestError> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(EMBED_BATCH) {
            debug!(batch = batch.len(), "Embedding batch");
            let response = self
                .provider
                .embed(EmbeddingRequest {
                    model: self.embedding_model.clone(),
                    inputs: batch.to_vec(),
                })
                .await?;
            embeddings.extend(response.embeddings);
        }

        Ok(embeddings)
    }
}
