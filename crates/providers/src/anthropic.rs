//! Anthropic backend — native Messages API.
//!
//! Differences from the OpenAI wire format:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as a top-level field
//! - Tool use arrives as `tool_use` content blocks with `input_schema` descriptors

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use swarmlet_core::error::BackendError;
use swarmlet_core::{CompletionRequest, InterfaceResult, Message, Role, ToolDefinition, ToolRequest, Usage};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic native Messages API backend.
pub struct AnthropicBackend {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Convert our message sequence to Anthropic format.
    ///
    /// The system prompt is a top-level field, so it never appears here. Tool
    /// output entries are folded in as user turns — the orchestration layer
    /// replays assistant text with tool results already folded into it, so
    /// this path only fires for histories built by external adapters.
    fn to_api_messages(messages: &[Message]) -> Vec<AnthropicMessage> {
        messages
            .iter()
            .map(|m| AnthropicMessage {
                role: match m.role {
                    Role::Assistant => "assistant".into(),
                    Role::User | Role::Tool => "user".into(),
                },
                content: m.content.clone(),
            })
            .collect()
    }

    /// Convert tool definitions to Anthropic format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<AnthropicTool> {
        tools
            .iter()
            .map(|t| AnthropicTool {
                name: t.name.clone(),
                description: t.description.clone(),
                input_schema: t.parameters.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl swarmlet_core::ModelBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<InterfaceResult, BackendError> {
        let url = format!("{}/v1/messages", self.base_url);

        let mut body = serde_json::json!({
            "model": request.model,
            "system": request.system,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
        }

        debug!(model = %request.model, tools = request.tools.len(), "Sending messages request");

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(BackendError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(BackendError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic returned error");
            return Err(BackendError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(format!("Failed to parse response: {e}")))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for block in api_response.content {
            match block {
                ResponseBlock::Text { text } => {
                    if !content.is_empty() {
                        content.push('\n');
                    }
                    content.push_str(&text);
                }
                ResponseBlock::ToolUse { name, input, .. } => {
                    tool_calls.push(ToolRequest {
                        name,
                        arguments: input,
                    });
                }
            }
        }

        let tokens = api_response
            .usage
            .map(|u| u.input_tokens + u.output_tokens)
            .unwrap_or(0);

        Ok(InterfaceResult {
            content,
            tool_calls,
            usage: Usage {
                tokens,
                time_ms: elapsed_ms,
            },
        })
    }
}

// --- Anthropic API types (internal) ---

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    name: String,
    description: String,
    input_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ResponseBlock>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[allow(dead_code)]
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_defaults() {
        let backend = AnthropicBackend::new("sk-ant-test");
        assert_eq!(backend.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_trims_slash() {
        let backend = AnthropicBackend::new("sk-ant-test").with_base_url("http://localhost:9000/");
        assert_eq!(backend.base_url, "http://localhost:9000");
    }

    #[test]
    fn message_conversion_roles() {
        let messages = vec![
            Message::user("question"),
            Message::assistant("answer", "helper"),
            Message::tool_output("raw output"),
        ];
        let api_messages = AnthropicBackend::to_api_messages(&messages);
        assert_eq!(api_messages[0].role, "user");
        assert_eq!(api_messages[1].role, "assistant");
        assert_eq!(api_messages[2].role, "user");
    }

    #[test]
    fn tool_definition_uses_input_schema() {
        let tools = vec![ToolDefinition {
            name: "file_read".into(),
            description: "Read a file".into(),
            parameters: serde_json::json!({"type": "object"}),
        }];
        let api_tools = AnthropicBackend::to_api_tools(&tools);
        assert_eq!(api_tools[0].name, "file_read");
        assert_eq!(api_tools[0].input_schema["type"], "object");
    }

    #[test]
    fn parse_text_response() {
        let data = r#"{
            "content": [{"type": "text", "text": "Hello from Claude"}],
            "usage": {"input_tokens": 12, "output_tokens": 8}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(data).unwrap();
        assert!(matches!(&parsed.content[0], ResponseBlock::Text { text } if text.contains("Claude")));
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.input_tokens + usage.output_tokens, 20);
    }

    #[test]
    fn parse_tool_use_response() {
        let data = r#"{
            "content": [
                {"type": "text", "text": "Let me check that file."},
                {"type": "tool_use", "id": "toolu_1", "name": "file_read", "input": {"path": "notes.txt"}}
            ],
            "usage": {"input_tokens": 30, "output_tokens": 15}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.content.len(), 2);
        match &parsed.content[1] {
            ResponseBlock::ToolUse { name, input, .. } => {
                assert_eq!(name, "file_read");
                assert_eq!(input["path"], "notes.txt");
            }
            _ => panic!("Expected tool_use block"),
        }
    }
}
