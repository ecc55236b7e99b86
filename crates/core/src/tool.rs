//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what give an agent the ability to act in the world: execute
//! commands, read/write files, etc. A tool is a pure contract — name,
//! description, parameter schema, and an async handler.
//!
//! # Handler contract
//!
//! Anticipated failures must be returned **as data** — a
//! `{"success": false, "error": ...}`-shaped value — because the agent does
//! not isolate individual tool executions: a returned [`ToolError`] fails the
//! whole invocation and skips the remaining tool calls in that response.
//! Malformed arguments are the legitimate error path. The core never validates
//! arguments against the schema; the schema is advertisement for the backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::ToolDefinition;
use crate::context::NetworkContext;
use crate::error::ToolError;

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool within an agent's tool set.
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the backend).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Run the handler with parsed arguments and the invocation context.
    ///
    /// The returned value is JSON-serialized into the agent's textual
    /// response.
    async fn call(
        &self,
        arguments: serde_json::Value,
        context: &NetworkContext,
    ) -> std::result::Result<serde_json::Value, ToolError>;

    /// Convert this tool into a descriptor for the backend.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// The set of tools owned by one agent.
///
/// Names are unique within a set; inserting under an existing name replaces
/// the previous tool.
#[derive(Default, Clone)]
pub struct ToolSet {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool, replacing any existing tool with the same name.
    pub fn insert(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Builder-style insert.
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.insert(tool);
        self
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Descriptors for every tool (for sending to the backend).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// List all tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
