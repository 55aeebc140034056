//! The chatbot orchestrator.
//!
//! Owns the memory window and the router; one `ask` per turn. The turn is
//! recorded only after the router returns successfully — a failed turn
//! leaves memory exactly as it was.

use crate::answerer::DocumentAnswerer;
use crate::rephraser::QueryRephraser;
use crate::router::ToolRouter;
use docsage_config::Settings;
use docsage_core::error::Error;
use docsage_core::message::Message;
use docsage_core::provider::Provider;
use docsage_core::retrieval::Retriever;
use docsage_core::tool::ToolRegistry;
use docsage_memory::ChatMemory;
use std::sync::Arc;
use tracing::info;

pub struct Chatbot {
    memory: ChatMemory,
    router: ToolRouter,
}

impl Chatbot {
    /// Wire the full chain: memory → rephraser → answering stage → router.
    /// Each component depends only on those before it.
    pub fn new(
        settings: &Settings,
        provider: Arc<dyn Provider>,
        retriever: Arc<dyn Retriever>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let memory = ChatMemory::new(settings.chat_turns);

        let rephraser = QueryRephraser::new(
            Arc::clone(&provider),
            &settings.llm_model,
            settings.temperature,
        );

        let answerer = Arc::new(DocumentAnswerer::new(
            rephraser,
            retriever,
            Arc::clone(&provider),
            &settings.llm_model,
            settings.temperature,
            settings.top_k,
        ));

        let router = ToolRouter::new(
            provider,
            &settings.llm_model,
            settings.temperature,
            tools,
            answerer,
        );

        Self { memory, router }
    }

    /// Answer one question, recording the turn on success.
    ///
    /// Turns are serialized through the exclusive borrow — one active
    /// conversation per chatbot instance.
    pub async fn ask(&mut self, question: &str) -> Result<String, Error> {
        let history = self.memory.snapshot();
        let answer = self.router.route(question, &history).await?;
        self.memory.append(question, &answer);
        Ok(answer)
    }

    /// Drop all conversation history.
    pub fn clear_history(&mut self) {
        self.memory.clear();
        info!("Chat history cleared");
    }

    /// The current memory window contents (read-only view).
    pub fn history(&self) -> Vec<Message> {
        self.memory.snapshot()
    }
}
