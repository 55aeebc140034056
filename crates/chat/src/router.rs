//! The tool router — one function-calling pass per turn.
//!
//! The routing model sees three capabilities: the document-QA pipeline, the
//! side-effecting tools, and answering directly (greetings, small talk). It
//! either emits text straight away or requests a tool, whose result is fed
//! back for the final text.
//!
//! Failure split: provider and retrieval failures abort the turn; tool
//! failures are converted to error strings the model relays.

use crate::answerer::DocumentAnswerer;
use crate::prompts::{DOC_QA_TOOL, ROUTER_SYSTEM_PROMPT};
use docsage_core::error::Error;
use docsage_core::message::{Message, MessageToolCall};
use docsage_core::provider::{Provider, ProviderRequest, ToolDefinition};
use docsage_core::tool::{ToolCall, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on LLM round-trips per turn. One tool selection plus the
/// final relay is the expected shape; the bound only guards against a model
/// that keeps requesting tools.
const MAX_ITERATIONS: u32 = 4;

pub struct ToolRouter {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    tools: Arc<ToolRegistry>,
    answerer: Arc<DocumentAnswerer>,
    max_iterations: u32,
}

impl ToolRouter {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        answerer: Arc<DocumentAnswerer>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            tools,
            answerer,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// The document-QA capability as the model sees it. It is not a
    /// registry entry — the router dispatches it by name to the injected
    /// answering stage, which also needs the history.
    fn doc_qa_definition() -> ToolDefinition {
        ToolDefinition {
            name: DOC_QA_TOOL.into(),
            description: "Answer a user question from the document knowledge base. \
This should be your default tool for any informational query."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question to answer from the documents"
                    }
                },
                "required": ["question"]
            }),
        }
    }

    /// Route one question to its final answer text.
    pub async fn route(&self, question: &str, history: &[Message]) -> Result<String, Error> {
        let mut messages = vec![Message::system(ROUTER_SYSTEM_PROMPT)];
        messages.extend_from_slice(history);
        messages.push(Message::user(question));

        let mut definitions = self.tools.definitions();
        definitions.push(Self::doc_qa_definition());

        let mut iteration = 0;
        loop {
            iteration += 1;
            if iteration > self.max_iterations {
                warn!(iterations = iteration, "Max routing iterations reached");
                break;
            }

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                temperature: self.temperature,
                max_tokens: None,
                tools: definitions.clone(),
            };
            let response = self.provider.complete(request).await?;

            if response.message.tool_calls.is_empty() {
                debug!(iteration, "Router produced final text");
                return Ok(response.message.content);
            }

            let tool_calls = response.message.tool_calls.clone();
            messages.push(response.message);

            for tc in &tool_calls {
                info!(tool = %tc.name, "Routing to tool");
                let output = self.dispatch(tc, question, history).await?;
                messages.push(Message::tool_result(&tc.id, output));
            }
        }

        Ok("I wasn't able to finish handling that request. Please try rephrasing.".into())
    }

    /// Execute one requested tool call.
    ///
    /// Document-QA errors propagate (they are remote-call failures); every
    /// other tool problem becomes a string result.
    async fn dispatch(
        &self,
        tc: &MessageToolCall,
        question: &str,
        history: &[Message],
    ) -> Result<String, Error> {
        let arguments: serde_json::Value =
            serde_json::from_str(&tc.arguments).unwrap_or_default();

        if tc.name == DOC_QA_TOOL {
            let q = arguments["question"].as_str().unwrap_or(question);
            let answer = self.answerer.answer(q, history).await?;
            return Ok(answer.text);
        }

        let call = ToolCall {
            id: tc.id.clone(),
            name: tc.name.clone(),
            arguments,
        };
        match self.tools.execute(&call).await {
            // success=false results already carry an error description
            Ok(result) => Ok(result.output),
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                Ok(format!("Error: {e}"))
            }
        }
    }
}
