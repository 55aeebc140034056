//! # DocSage Core
//!
//! Domain types, traits, and error definitions for the DocSage document-QA
//! assistant. This crate defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every remote collaborator is defined as a trait here — the LLM backend
//! (`Provider`), the vector lookup (`Retriever`), and agent capabilities
//! (`Tool`). Implementations live in their respective crates. This enables:
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod retrieval;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition};
pub use retrieval::{Passage, Retriever};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
