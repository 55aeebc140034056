//! `docsage status` — show settings and index health.

use anyhow::Context;
use docsage_config::Settings;
use docsage_index::VectorStore;

pub async fn run() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    println!();
    println!("  DocSage status");
    println!("  --------------");
    println!("  API key:          {}", if settings.api_key.is_some() { "configured" } else { "MISSING" });
    println!("  Endpoint:         {}", settings.api_url);
    println!("  Model:            {}", settings.llm_model);
    println!("  Embedding model:  {}", settings.embedding_model);
    println!("  Memory window:    {} turns", settings.chat_turns);
    println!("  Retrieval k:      {}", settings.top_k);

    let index_path = settings.index_path();
    match VectorStore::open(&index_path) {
        Ok(store) => {
            println!("  Index:            {} ({} chunks)", index_path.display(), store.len());
            for source in store.sources() {
                println!("    - {source}");
            }
        }
        Err(e) => {
            println!("  Index:            unavailable ({e})");
            println!("                    run `docsage ingest` to build it");
        }
    }
    println!();

    Ok(())
}
