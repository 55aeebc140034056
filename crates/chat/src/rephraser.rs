//! Query rephrasing — history-aware standalone search queries.
//!
//! A follow-up like "how do I install *it*?" is useless as a vector-search
//! query. One LLM call over the conversation turns it into a standalone
//! query the retriever can resolve.

use crate::prompts::REPHRASE_PROMPT;
use docsage_core::error::ProviderError;
use docsage_core::message::Message;
use docsage_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

pub struct QueryRephraser {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl QueryRephraser {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Produce a standalone search query from the question and the
    /// conversation so far. The model's full response text is the query,
    /// verbatim — no parsing or validation.
    pub async fn rephrase(
        &self,
        question: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        let mut messages = history.to_vec();
        messages.push(Message::user(question));
        messages.push(Message::user(REPHRASE_PROMPT));

        let request = ProviderRequest::completion(&self.model, messages, self.temperature);
        let response = self.provider.complete(request).await?;

        let query = response.message.content;
        debug!(query = %query, "Question rephrased for retrieval");
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockProvider;

    #[tokio::test]
    async fn returns_model_output_verbatim() {
        let provider = Arc::new(SequentialMockProvider::single_text("OMEdit installation"));
        let rephraser = QueryRephraser::new(provider, "mock-model", 0.0);

        let query = rephraser
            .rephrase("how do I install it?", &[])
            .await
            .unwrap();
        assert_eq!(query, "OMEdit installation");
    }

    #[tokio::test]
    async fn prompt_carries_history_then_question_then_instruction() {
        let provider = Arc::new(SequentialMockProvider::single_text("q"));
        let rephraser = QueryRephraser::new(provider.clone(), "mock-model", 0.0);

        let history = vec![
            Message::user("What is OMEdit?"),
            Message::assistant("OMEdit is the GUI."),
        ];
        rephraser.rephrase("how do I install it?", &history).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].content, "What is OMEdit?");
        assert_eq!(messages[2].content, "how do I install it?");
        assert_eq!(messages[3].content, REPHRASE_PROMPT);
        // Rephrasing never offers tools
        assert!(requests[0].tools.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(SequentialMockProvider::single_error(
            ProviderError::Network("connection refused".into()),
        ));
        let rephraser = QueryRephraser::new(provider, "mock-model", 0.0);

        let err = rephraser.rephrase("anything", &[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
