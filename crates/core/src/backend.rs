//! Model backend trait — the abstraction over LLM services.
//!
//! A backend turns (system prompt, message history, tool descriptors) into a
//! normalized [`InterfaceResult`]: assistant text plus zero or more requested
//! tool invocations. Implementations live in `swarmlet-providers`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::message::Message;

/// The closed set of supported backend kinds.
///
/// Adding a backend means adding a variant here plus an implementation in the
/// providers crate; the dispatch site is a single exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Model configuration carried by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which backend services this agent
    pub provider: ProviderKind,

    /// The model to request (e.g., "gpt-4o-mini")
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl ModelConfig {
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

/// A tool definition sent to the backend so the model knows what it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// One completion request: everything a backend needs to produce a response.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The model to use
    pub model: String,

    /// The resolved system prompt
    pub system: String,

    /// The conversation replayed verbatim
    pub messages: Vec<Message>,

    /// Tools the model may request
    pub tools: Vec<ToolDefinition>,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// A tool invocation requested by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Name of the tool to invoke
    pub name: String,

    /// Parsed arguments
    pub arguments: serde_json::Value,
}

/// Token and timing statistics for one backend call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Total tokens consumed (prompt + completion)
    pub tokens: u32,

    /// Wall-clock duration of the backend call in milliseconds
    pub time_ms: u64,
}

/// The normalized response of one model call, prior to tool execution folding.
///
/// `tool_calls` reflects only what the backend requested; the agent folds
/// execution outcomes into `content` without touching this list.
#[derive(Debug, Clone)]
pub struct InterfaceResult {
    /// Assistant text (tool results are appended by the agent)
    pub content: String,

    /// Tool invocations the model requested, in order
    pub tool_calls: Vec<ToolRequest>,

    /// Usage statistics
    pub usage: Usage,
}

/// The core ModelBackend trait.
///
/// Every LLM service (OpenAI, Anthropic) implements this trait. The agent
/// calls `complete()` without knowing which backend is in play. Unsupported
/// or unconfigured backends fail fast with [`BackendError::NotConfigured`] —
/// a fatal configuration error, never retried.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<InterfaceResult, BackendError>;
}
