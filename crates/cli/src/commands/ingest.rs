//! `docsage ingest` — build the vector index from the document corpus.

use anyhow::Context;
use docsage_config::Settings;
use docsage_index::Ingestor;
use docsage_providers::OpenAiProvider;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(file: Option<PathBuf>) -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    let api_key = settings
        .require_api_key()
        .context("Ingestion needs an API key for the embeddings endpoint")?;

    let pdf_path = file.unwrap_or_else(|| settings.docs_dir.join(&settings.docs_file));
    let index_path = settings.index_path();

    println!(
        "  Ingesting '{}' into collection '{}'...",
        pdf_path.display(),
        settings.collection
    );

    let provider = Arc::new(OpenAiProvider::new(&settings.api_url, api_key));
    let ingestor = Ingestor::new(
        provider,
        &settings.embedding_model,
        settings.chunk_size,
        settings.chunk_overlap,
    );

    let report = ingestor
        .ingest_pdf(&pdf_path, &index_path)
        .await
        .context("Ingestion failed")?;

    println!(
        "  Done: {} pages → {} chunks stored in '{}'.",
        report.pages,
        report.chunks,
        index_path.display()
    );
    Ok(())
}
