//! Save conversation tool — writes the transcript to a timestamped file.
//!
//! Never raises: every failure mode (missing argument, I/O error) is
//! captured and returned as a descriptive string result so the routing
//! model can relay it to the user.

use async_trait::async_trait;
use chrono::Local;
use docsage_core::error::ToolError;
use docsage_core::tool::{Tool, ToolResult};
use std::path::PathBuf;
use tracing::warn;

pub struct SaveConversationTool {
    save_dir: PathBuf,
}

impl SaveConversationTool {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }
}

#[async_trait]
impl Tool for SaveConversationTool {
    fn name(&self) -> &str {
        "save_conversation"
    }

    fn description(&self) -> &str {
        "Saves the provided conversation history to a text file. Use this only when the user explicitly asks to save, export, or write down the chat. Provide the full conversation history as the 'conversation_history' argument."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "conversation_history": {
                    "type": "string",
                    "description": "The full conversation transcript to save"
                }
            },
            "required": ["conversation_history"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let Some(history) = arguments["conversation_history"].as_str() else {
            return Ok(ToolResult::error(
                "Error: No valid conversation history was provided to save.",
            ));
        };
        if history.is_empty() {
            return Ok(ToolResult::error(
                "Error: No valid conversation history was provided to save.",
            ));
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("chat_history_{timestamp}.txt");
        let path = self.save_dir.join(&filename);

        let mut content = String::from("Conversation History\n");
        content.push_str(&"=".repeat(20));
        content.push_str("\n\n");
        content.push_str(history);

        match tokio::fs::write(&path, content).await {
            Ok(()) => Ok(ToolResult::ok(format!(
                "Conversation successfully saved to '{filename}'."
            ))),
            Err(e) => {
                warn!(path = %path.display(), "Failed to save conversation: {e}");
                Ok(ToolResult::error(format!(
                    "Error: Failed to save conversation. {e}"
                )))
            }
        }
    }
}
