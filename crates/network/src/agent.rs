//! The agent invocation cycle.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use swarmlet_core::error::ToolError;
use swarmlet_core::{
    CompletionRequest, EventBus, InterfaceResult, Message, ModelBackend, ModelConfig,
    NetworkContext, NetworkEvent, Result, Tool, ToolSet,
};
use tracing::{debug, info};

/// An agent's system prompt: a fixed string, or derived from the invocation
/// context (so an agent can introspect the owning network's history or state).
pub enum SystemPrompt {
    Static(String),
    Resolver(Box<dyn Fn(&NetworkContext) -> String + Send + Sync>),
}

impl SystemPrompt {
    /// Build a context-derived prompt.
    pub fn resolver(f: impl Fn(&NetworkContext) -> String + Send + Sync + 'static) -> Self {
        Self::Resolver(Box::new(f))
    }

    fn resolve(&self, context: &NetworkContext) -> String {
        match self {
            Self::Static(prompt) => prompt.clone(),
            Self::Resolver(f) => f(context),
        }
    }
}

impl From<String> for SystemPrompt {
    fn from(prompt: String) -> Self {
        Self::Static(prompt)
    }
}

impl From<&str> for SystemPrompt {
    fn from(prompt: &str) -> Self {
        Self::Static(prompt.to_string())
    }
}

/// A configured (prompt, model, tools) unit producing one response per
/// invocation. Stateless across invocations except through the network's
/// state store and history.
pub struct Agent {
    name: String,
    system: SystemPrompt,
    tools: ToolSet,
    model: ModelConfig,
    backend: Arc<dyn ModelBackend>,
    events: Arc<EventBus>,
}

impl Agent {
    /// Create a new agent.
    pub fn new(
        name: impl Into<String>,
        system: impl Into<SystemPrompt>,
        model: ModelConfig,
        backend: Arc<dyn ModelBackend>,
    ) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
            tools: ToolSet::new(),
            model,
            backend,
            events: Arc::new(EventBus::default()),
        }
    }

    /// Replace the agent's tool set.
    pub fn with_tools(mut self, tools: ToolSet) -> Self {
        self.tools = tools;
        self
    }

    /// Add a single tool.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool);
        self
    }

    /// Attach an event bus for tool-call observation.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Run one invocation cycle: one backend call, then the requested tool
    /// calls executed sequentially in backend order.
    ///
    /// When the context carries a network with non-empty history, that history
    /// is replayed verbatim and `input` is superseded — callers must not
    /// assume `input` alone determines behavior after a network's first turn.
    /// On the first turn (or standalone) a single user message wraps `input`.
    ///
    /// Tool execution outcomes are folded into the returned `content` as
    /// `"Tool <name> result: <json>"` blocks; the `tool_calls` field reflects
    /// only what the backend requested. A tool handler that returns an error
    /// fails the whole invocation — the remaining tool calls in that response
    /// never execute and no partial result is returned.
    pub async fn invoke(
        &self,
        input: &str,
        context: &NetworkContext,
    ) -> Result<InterfaceResult> {
        let system = self.system.resolve(context);

        let history = context.history();
        let messages = if history.is_empty() {
            vec![Message::user(input)]
        } else {
            history.to_vec()
        };

        debug!(
            agent = %self.name,
            backend = self.backend.name(),
            messages = messages.len(),
            tools = self.tools.len(),
            "Invoking model backend"
        );

        let request = CompletionRequest {
            model: self.model.model.clone(),
            system,
            messages,
            tools: self.tools.definitions(),
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
        };

        let mut result = self.backend.complete(request).await?;

        for call in result.tool_calls.clone() {
            let tool = self
                .tools
                .get(&call.name)
                .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;

            self.events.publish(NetworkEvent::ToolCallStarted {
                agent: self.name.clone(),
                tool: call.name.clone(),
                timestamp: Utc::now(),
            });

            let started = Instant::now();
            let value = tool.call(call.arguments.clone(), context).await?;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            self.events.publish(NetworkEvent::ToolCallFinished {
                agent: self.name.clone(),
                tool: call.name.clone(),
                time_ms: elapsed_ms,
                timestamp: Utc::now(),
            });

            let rendered = serde_json::to_string(&value)?;
            result
                .content
                .push_str(&format!("\n\nTool {} result: {}", call.name, rendered));
        }

        info!(
            agent = %self.name,
            tool_calls = result.tool_calls.len(),
            tokens = result.usage.tokens,
            "Agent invocation completed"
        );

        Ok(result)
    }
}
