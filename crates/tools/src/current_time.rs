//! Current time tool — pure, no side effects.

use async_trait::async_trait;
use chrono::Local;
use docsage_core::error::ToolError;
use docsage_core::tool::{Tool, ToolResult};

pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time. Call this whenever the user asks for the time, the date, or anything related to the current moment."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(ToolResult::ok(
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_formatted_timestamp() {
        let tool = CurrentTimeTool;
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        assert!(result.success);
        // YYYY-MM-DD HH:MM:SS
        let output = &result.output;
        assert_eq!(output.len(), 19);
        assert_eq!(&output[4..5], "-");
        assert_eq!(&output[10..11], " ");
        assert_eq!(&output[13..14], ":");
        assert!(output[0..4].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn tool_definition() {
        let tool = CurrentTimeTool;
        let def = tool.to_definition();
        assert_eq!(def.name, "get_current_time");
    }
}
