//! File read tool.

use async_trait::async_trait;
use swarmlet_core::error::ToolError;
use swarmlet_core::{NetworkContext, Tool};
use tracing::debug;

pub struct FileReadTool;

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read content from a file"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "The path of the file to read"
                }
            },
            "required": ["filepath"]
        })
    }

    async fn call(
        &self,
        arguments: serde_json::Value,
        _context: &NetworkContext,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let filepath = arguments["filepath"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'filepath' argument".into()))?;

        debug!(filepath = %filepath, "Reading file");

        match tokio::fs::read_to_string(filepath).await {
            Ok(content) => Ok(serde_json::json!({
                "success": true,
                "content": content,
                "filepath": filepath,
            })),
            Err(e) => Ok(serde_json::json!({
                "success": false,
                "error": e.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn read_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "file contents here").unwrap();

        let tool = FileReadTool;
        let result = tool
            .call(
                serde_json::json!({"filepath": file.path()}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["content"], "file contents here");
    }

    #[tokio::test]
    async fn missing_file_is_data_not_error() {
        let tool = FileReadTool;
        let result = tool
            .call(
                serde_json::json!({"filepath": "/nonexistent/nowhere.txt"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();

        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn missing_filepath_argument_errors() {
        let tool = FileReadTool;
        let result = tool
            .call(serde_json::json!({}), &NetworkContext::standalone())
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
