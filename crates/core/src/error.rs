//! Error types for the DocSage domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! The propagation policy (see the chatbot crate) is: provider and retrieval
//! failures abort the current turn; tool failures are recovered locally and
//! returned to the routing model as descriptive text.

use thiserror::Error;

/// The top-level error type for all DocSage operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider (remote LLM call) errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A remote completion or embedding call failed. Always fatal for the
/// current turn; never retried at this layer.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The backing vector index cannot be opened (missing or corrupt).
    #[error("Vector index unavailable: {0}")]
    IndexUnavailable(String),

    /// Embedding the search query failed (a remote-call failure).
    #[error("Query embedding failed: {0}")]
    EmbeddingFailed(#[source] ProviderError),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
