//! Vector index for DocSage.
//!
//! The data-preparation pipeline (PDF loading, chunking, embedding) and the
//! persisted store the retriever searches at answer time:
//!
//! ```text
//! ingest:   PDF ──loader──▶ pages ──splitter──▶ chunks ──embed──▶ store (JSON)
//! retrieve: query ──embed──▶ vector ──cosine top-k──▶ passages
//! ```

pub mod ingest;
pub mod loader;
pub mod retriever;
pub mod splitter;
pub mod store;
pub mod vector;

pub use ingest::{IngestError, IngestReport, Ingestor};
pub use retriever::IndexRetriever;
pub use store::{IndexedChunk, VectorStore};
