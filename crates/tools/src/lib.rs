//! Side-effecting tool implementations for DocSage.
//!
//! These are the capabilities the router can select besides the document-QA
//! pipeline: report the current time, save the conversation transcript.
//! Tool failures never abort a turn — they come back as error strings the
//! routing model can relay.

pub mod current_time;
pub mod save_conversation;

use docsage_core::tool::ToolRegistry;
use std::path::PathBuf;

pub use current_time::CurrentTimeTool;
pub use save_conversation::SaveConversationTool;

/// Create the default tool registry.
///
/// `save_dir` is where transcript files land (the current directory for the
/// interactive CLI).
pub fn default_registry(save_dir: impl Into<PathBuf>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CurrentTimeTool));
    registry.register(Box::new(SaveConversationTool::new(save_dir)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_both_tools() {
        let registry = default_registry(".");
        assert!(registry.get("get_current_time").is_some());
        assert!(registry.get("save_conversation").is_some());
        assert_eq!(registry.definitions().len(), 2);
    }
}
