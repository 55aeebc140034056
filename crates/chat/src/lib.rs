//! Conversational RAG pipeline for DocSage.
//!
//! The chain, outermost first:
//!
//! - [`Chatbot`] — owns the memory window, delegates each question to the
//!   router, records the turn on success.
//! - [`ToolRouter`] — one function-calling LLM pass that picks between the
//!   document-QA capability, a side-effecting tool, or a direct answer.
//! - [`DocumentAnswerer`] — rephrase → retrieve → grounded answer with
//!   source citations, refusing when the context doesn't support an answer.
//! - [`QueryRephraser`] — turns a follow-up question plus history into a
//!   standalone search query.

pub mod answerer;
pub mod chatbot;
pub mod prompts;
pub mod rephraser;
pub mod router;

pub use answerer::{AnswerResponse, DocumentAnswerer};
pub use chatbot::Chatbot;
pub use rephraser::QueryRephraser;
pub use router::ToolRouter;

#[cfg(test)]
pub(crate) mod test_helpers;
