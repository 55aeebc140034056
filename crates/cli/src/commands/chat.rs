//! `docsage chat` — interactive or single-question mode.

use anyhow::Context;
use docsage_chat::Chatbot;
use docsage_config::Settings;
use docsage_index::IndexRetriever;
use docsage_providers::OpenAiProvider;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let Ok(api_key) = settings.require_api_key() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    DOCSAGE_API_KEY = 'sk-...'");
        eprintln!("    OPENAI_API_KEY  = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", Settings::config_dir().join("config.toml").display());
        eprintln!();
        anyhow::bail!("No API key found. See above for setup instructions.");
    };

    let index_path = settings.index_path();
    if !index_path.exists() {
        eprintln!(
            "  Warning: vector index '{}' not found. Run `docsage ingest` first — \
document questions will fail until then.",
            index_path.display()
        );
    }

    let provider = Arc::new(OpenAiProvider::new(&settings.api_url, api_key));
    let retriever = Arc::new(IndexRetriever::new(
        index_path,
        provider.clone(),
        &settings.embedding_model,
    ));
    let tools = Arc::new(docsage_tools::default_registry("."));
    let mut chatbot = Chatbot::new(&settings, provider, retriever, tools);

    if let Some(question) = message {
        // Single question mode
        eprint!("  Thinking...");
        let answer = chatbot.ask(&question).await?;
        eprint!("\r             \r");
        println!("{answer}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  DocSage — ask questions about your documents.");
    println!("  Model: {}  |  Collection: {}", settings.llm_model, settings.collection);
    println!("  Type 'clear' to reset the conversation, 'exit' to quit.");
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        match input {
            "" => {}
            "exit" | "quit" => break,
            "clear" => {
                chatbot.clear_history();
                println!("  Chat history cleared.");
            }
            question => {
                eprint!("  ...");
                match chatbot.ask(question).await {
                    Ok(answer) => {
                        eprint!("\r     \r");
                        println!();
                        for line in answer.lines() {
                            println!("  Assistant > {line}");
                        }
                        println!();
                    }
                    Err(e) => {
                        eprint!("\r     \r");
                        eprintln!("  [Error] {e}");
                        eprintln!("  Please try again or check your connection.");
                        println!();
                    }
                }
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}
