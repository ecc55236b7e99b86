//! Shell tool — execute a command and return stdout/stderr.
//!
//! Commands are allowlisted on the first word. Denials and failed commands
//! come back as `success: false` data so the agent turn continues.

use async_trait::async_trait;
use swarmlet_core::error::ToolError;
use swarmlet_core::{NetworkContext, Tool};
use tokio::process::Command;
use tracing::{debug, warn};

/// Execute shell commands with an allowlist constraint.
pub struct ShellTool {
    /// If non-empty, only these commands are allowed.
    allowed_commands: Vec<String>,
}

impl ShellTool {
    pub fn new(allowed_commands: Vec<String>) -> Self {
        Self { allowed_commands }
    }

    /// Allow every command. For trusted environments only.
    pub fn unrestricted() -> Self {
        Self {
            allowed_commands: Vec::new(),
        }
    }

    fn is_command_allowed(&self, command: &str) -> bool {
        if self.allowed_commands.is_empty() {
            return true; // No allowlist = all commands allowed
        }

        let base_cmd = command.split_whitespace().next().unwrap_or("").trim();
        self.allowed_commands.iter().any(|a| a == base_cmd)
    }
}

#[async_trait]
impl Tool for ShellTool {
    fn name(&self) -> &str {
        "execute_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command and return the output"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn call(
        &self,
        arguments: serde_json::Value,
        _context: &NetworkContext,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let command = arguments["command"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'command' argument".into()))?;

        if !self.is_command_allowed(command) {
            let base = command.split_whitespace().next().unwrap_or("");
            warn!(command = %base, "Command not in allowlist");
            return Ok(serde_json::json!({
                "success": false,
                "error": format!("Command '{base}' not in allowlist"),
            }));
        }

        debug!(command = %command, "Executing shell command");

        let output = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", command]).output().await
        } else {
            Command::new("sh").args(["-c", command]).output().await
        };

        match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

                if output.status.success() {
                    Ok(serde_json::json!({
                        "success": true,
                        "stdout": stdout,
                        "stderr": stderr,
                    }))
                } else {
                    let code = output.status.code().unwrap_or(-1);
                    warn!(command = %command, exit_code = code, "Command failed");
                    Ok(serde_json::json!({
                        "success": false,
                        "error": format!("exit code {code}"),
                        "stdout": stdout,
                        "stderr": stderr,
                    }))
                }
            }
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

    #[test]
    fn allowlist_check() {
        let tool = ShellTool::new(vec!["ls".into(), "cat".into(), "git".into()]);
        assert!(tool.is_command_allowed("ls -la"));
        assert!(tool.is_command_allowed("cat file.txt"));
        assert!(tool.is_command_allowed("git status"));
        assert!(!tool.is_command_allowed("rm -rf /"));
        assert!(!tool.is_command_allowed("sudo something"));
    }

    #[test]
    fn empty_allowlist_allows_all() {
        let tool = ShellTool::unrestricted();
        assert!(tool.is_command_allowed("anything goes"));
    }

    #[tokio::test]
    async fn execute_echo() {
        let tool = ShellTool::unrestricted();
        let result = tool
            .call(
                serde_json::json!({"command": "echo orchestrated"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["stdout"], "orchestrated");
    }

    #[tokio::test]
    async fn denied_command_is_data_not_error() {
        let tool = ShellTool::new(vec!["ls".into()]);
        let result = tool
            .call(
                serde_json::json!({"command": "rm -rf /tmp/x"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("rm"));
    }

    #[tokio::test]
    async fn failing_command_is_data_not_error() {
        let tool = ShellTool::unrestricted();
        let result = tool
            .call(
                serde_json::json!({"command": "sh -c 'exit 3'"}),
                &NetworkContext::standalone(),
            )
            .await
            .unwrap();
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("3"));
    }

    #[tokio::test]
    async fn missing_command_argument_errors() {
        let tool = ShellTool::unrestricted();
        let result = tool
            .call(serde_json::json!({}), &NetworkContext::standalone())
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
