//! Conversational window memory.
//!
//! A bounded sliding window over past turns (one turn = one user message +
//! one assistant message). The chatbot appends a turn after every successful
//! answer; the window evicts the oldest turn first once full. Process-local
//! only — nothing is persisted across restarts.

use docsage_core::Message;
use std::collections::VecDeque;
use tracing::debug;

/// A bounded FIFO window of conversation messages.
///
/// Capacity is `turns * 2` messages. All operations are total functions over
/// the window state — there are no error conditions.
pub struct ChatMemory {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl ChatMemory {
    /// Create an empty window retaining the last `turns` conversation turns.
    pub fn new(turns: usize) -> Self {
        let capacity = turns * 2;
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add one turn, evicting the oldest turn when the window is full.
    pub fn append(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        self.messages.push_back(Message::user(user_text));
        self.messages.push_back(Message::assistant(assistant_text));

        while self.messages.len() > self.capacity {
            // Evict a whole turn so the window never starts mid-pair.
            self.messages.pop_front();
            self.messages.pop_front();
        }

        debug!(messages = self.messages.len(), "Memory window updated");
    }

    /// The current ordered message sequence, cloned for prompt construction.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Empty the window unconditionally. Idempotent.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
