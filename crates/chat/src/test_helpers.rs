//! Shared test helpers for the conversational chain.

use docsage_core::error::{ProviderError, RetrievalError};
use docsage_core::message::{Message, MessageToolCall};
use docsage_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use docsage_core::retrieval::{Passage, Retriever};
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next item in the script and records
/// the request for later inspection. Panics if more calls are made than
/// items scripted.
pub struct SequentialMockProvider {
    script: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    call_count: Mutex<usize>,
}

impl SequentialMockProvider {
    pub fn new(script: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// A provider that returns a single text response (no tool calls).
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(make_text_response(text))])
    }

    /// A provider that returns one text response per entry, in order.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(make_text_response(t))).collect())
    }

    /// A provider whose only call fails.
    pub fn single_error(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Script from plain text / error shorthands.
    pub fn with_script(script: Vec<Result<String, ProviderError>>) -> Self {
        Self::new(
            script
                .into_iter()
                .map(|item| item.map(|text| make_text_response(&text)))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request seen so far, in call order.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let script = self.script.lock().unwrap();

        if *count >= script.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                *count,
                script.len()
            );
        }

        self.requests.lock().unwrap().push(request);
        let response = script[*count].clone();
        *count += 1;
        response
    }
}

/// Create a simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Create a response with tool calls and optional thought content.
pub fn make_tool_call_response(tool_calls: Vec<MessageToolCall>, thought: &str) -> ProviderResponse {
    let mut msg = Message::assistant(thought);
    msg.tool_calls = tool_calls;
    ProviderResponse {
        message: msg,
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Helper to create a tool call.
pub fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}

/// A retriever that returns a fixed passage list (or one scripted failure).
pub struct StaticRetriever {
    passages: Vec<Passage>,
    failure: Mutex<Option<RetrievalError>>,
}

impl StaticRetriever {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            failure: Mutex::new(None),
        }
    }

    pub fn failing(error: RetrievalError) -> Self {
        Self {
            passages: Vec::new(),
            failure: Mutex::new(Some(error)),
        }
    }
}

#[async_trait::async_trait]
impl Retriever for StaticRetriever {
    async fn search(&self, _query: &str, k: usize) -> Result<Vec<Passage>, RetrievalError> {
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}
