//! The document answering stage.
//!
//! Rephrase → retrieve → one grounded completion. The answer is constrained
//! to the retrieved passages; when retrieval comes back empty the stage
//! returns the fixed refusal without consulting the model at all. Source
//! citations are deduplicated and sorted before rendering.
//!
//! This stage never touches conversation memory — recording the turn is the
//! caller's responsibility.

use crate::prompts::{REFUSAL, qa_system_prompt};
use crate::rephraser::QueryRephraser;
use docsage_core::error::Error;
use docsage_core::message::Message;
use docsage_core::provider::{Provider, ProviderRequest};
use docsage_core::retrieval::{Passage, Retriever};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

/// A grounded answer with its source citations.
///
/// `text` is the final user-facing answer (Sources block included when
/// citations exist); `citations` keeps the deduplicated, ordered set for
/// inspection.
#[derive(Debug, Clone)]
pub struct AnswerResponse {
    pub text: String,
    pub citations: BTreeSet<String>,
}

pub struct DocumentAnswerer {
    rephraser: QueryRephraser,
    retriever: Arc<dyn Retriever>,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    top_k: usize,
}

impl DocumentAnswerer {
    pub fn new(
        rephraser: QueryRephraser,
        retriever: Arc<dyn Retriever>,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        top_k: usize,
    ) -> Self {
        Self {
            rephraser,
            retriever,
            provider,
            model: model.into(),
            temperature,
            top_k,
        }
    }

    /// Answer a question from the document corpus.
    ///
    /// Provider and retrieval failures propagate — they are fatal for the
    /// turn (no retries, no fallback answer).
    pub async fn answer(
        &self,
        question: &str,
        history: &[Message],
    ) -> Result<AnswerResponse, Error> {
        let query = self.rephraser.rephrase(question, history).await?;

        let passages = self.retriever.search(&query, self.top_k).await?;
        debug!(passages = passages.len(), "Context retrieved");

        if passages.is_empty() {
            info!("No matching passages; refusing");
            return Ok(AnswerResponse {
                text: REFUSAL.to_string(),
                citations: BTreeSet::new(),
            });
        }

        let mut messages = vec![Message::system(qa_system_prompt(&format_context(&passages)))];
        messages.extend_from_slice(history);
        messages.push(Message::user(question));

        let request = ProviderRequest::completion(&self.model, messages, self.temperature);
        let response = self.provider.complete(request).await?;

        let mut text = response.message.content;
        let citations = collect_citations(&passages);
        if !citations.is_empty() {
            let lines: Vec<String> = citations.iter().map(|c| format!("- {c}")).collect();
            text.push_str("\n\nSources:\n");
            text.push_str(&lines.join("\n"));
        }

        Ok(AnswerResponse { text, citations })
    }
}

/// Render the passages into the context block of the system prompt.
fn format_context(passages: &[Passage]) -> String {
    let mut context = String::new();
    for passage in passages {
        if !context.is_empty() {
            context.push_str("\n\n");
        }
        let _ = write!(context, "[{}]\n{}", citation(passage), passage.content);
    }
    context
}

/// Format one passage's citation. Stored page indices are 0-based; display
/// pages are 1-based.
fn citation(passage: &Passage) -> String {
    match passage.page {
        Some(page) => format!("{} (page {})", passage.source, page + 1),
        None => format!("{} (Unknown Page)", passage.source),
    }
}

/// Deduplicated citations in lexicographic order.
fn collect_citations(passages: &[Passage]) -> BTreeSet<String> {
    passages.iter().map(citation).collect()
}
