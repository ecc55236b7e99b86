//! File write tool.

use async_trait::async_trait;
use std::path::Path;
use swarmlet_core::error::ToolError;
use swarmlet_core::{NetworkContext, Tool};
use tracing::debug;

pub struct FileWriteTool;

#[async_trait]
impl Tool for FileWriteTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "The path where the file should be written"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["filepath", "content"]
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
        let content = arguments["content"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'content' argument".into()))?;

        debug!(filepath = %filepath, bytes = content.len(), "Writing file");

        if let Some(parent) = Path::new(filepath).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Ok(serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    }));
                }
            }
        }

        match tokio::fs::write(filepath, content).await {
            Ok(()) => Ok(serde_json::json!({
                "success": true,
                "message": format!("File written successfully to {filepath}"),
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

    #[tokio::test]
    async fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let tool = FileWriteTool;
        let result = tool
            .call(
                serde_json::json!({"filepath": path, "content": "written by agent"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "written by agent");
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");

        let tool = FileWriteTool;
        let result = tool
            .call(
                serde_json::json!({"filepath": path, "content": "nested"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn missing_content_argument_errors() {
        let tool = FileWriteTool;
        let result = tool
            .call(
                serde_json::json!({"filepath": "/tmp/x.txt"}),
                &NetworkContext::standalone(),
            )
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
