//! The multi-agent network loop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use swarmlet_core::{
    Error, EventBus, HistoryAdapter, InMemoryHistory, Message, NetworkContext, NetworkEvent,
    NetworkView, Result, StateStore,
};
use tracing::{debug, info};

use crate::agent::Agent;
use crate::router::{Router, RouterArgs};

const DEFAULT_MAX_ITER: usize = 10;
const PREVIEW_CHARS: usize = 80;

/// A bounded control loop coordinating multiple agents via a router, with
/// shared history and key-value state.
///
/// The agents map is built once at construction and never changes. The
/// network exclusively owns and mutates the history sequence; agents and
/// tools only ever see snapshots passed through the invocation context.
pub struct Network {
    name: String,
    agents: HashMap<String, Agent>,
    state: Arc<StateStore>,
    router: Router,
    history: Vec<Message>,
    adapter: Arc<dyn HistoryAdapter>,
    max_iter: usize,
    events: Arc<EventBus>,
}

impl Network {
    /// Start building a network.
    pub fn builder(name: impl Into<String>) -> NetworkBuilder {
        NetworkBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared run-scoped state store.
    pub fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    /// The shared history accumulated so far.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Names of all registered agents.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.keys().map(|s| s.as_str()).collect()
    }

    /// Run the network: seed history with `input`, then loop — router selects
    /// an agent (or signals termination), the agent is invoked with the
    /// original seed input and a context view of this network, and its reply
    /// is appended to history tagged with the agent's name.
    ///
    /// The loop stops when the router returns no agent (graceful termination,
    /// not an error) or after `max_iter` invocations. Either way the
    /// accumulated history is persisted through the adapter exactly once and
    /// returned in full.
    pub async fn run(&mut self, input: &str) -> Result<Vec<Message>> {
        let thread = self.adapter.create_thread().await?;

        self.history.push(Message::user(input));
        self.events.publish(NetworkEvent::RunStarted {
            network: self.name.clone(),
            input_preview: preview(input),
            timestamp: Utc::now(),
        });

        info!(
            network = %self.name,
            thread = %thread,
            max_iter = self.max_iter,
            "Network run starting"
        );

        let mut iterations = 0usize;

        for iteration in 0..self.max_iter {
            // The router is consulted fresh every iteration so it can react
            // to the latest history and state.
            let selected = match &self.router {
                Router::Selector(select) => {
                    let args = RouterArgs {
                        history: &self.history,
                        state: &self.state,
                    };
                    select(&args)
                }
                Router::Agent(router_agent) => {
                    let snapshot = serde_json::json!({
                        "history": &self.history,
                        "state": self.state.snapshot(),
                    });
                    let decision = router_agent
                        .invoke(&snapshot.to_string(), &NetworkContext::standalone())
                        .await?;
                    Some(decision.content)
                }
            };

            // An unknown name is equivalent to termination.
            let agent = selected.as_deref().and_then(|name| self.agents.get(name));

            self.events.publish(NetworkEvent::RouterSelected {
                network: self.name.clone(),
                agent: agent.map(|a| a.name().to_string()),
                iteration,
                timestamp: Utc::now(),
            });

            let Some(agent) = agent else {
                debug!(network = %self.name, iteration, "Router terminated the run");
                break;
            };

            let context = NetworkContext::within(NetworkView {
                name: self.name.clone(),
                agents: self.agents.keys().cloned().collect(),
                state: Arc::clone(&self.state),
                history: self.history.clone(),
            });

            self.events.publish(NetworkEvent::AgentInvoked {
                agent: agent.name().to_string(),
                iteration,
                timestamp: Utc::now(),
            });

            let result = agent.invoke(input, &context).await?;
            iterations += 1;

            self.events.publish(NetworkEvent::AgentCompleted {
                agent: agent.name().to_string(),
                tokens: result.usage.tokens,
                time_ms: result.usage.time_ms,
                timestamp: Utc::now(),
            });

            self.history
                .push(Message::assistant(result.content, agent.name()));
        }

        self.adapter.append_results(&thread, &self.history).await?;

        self.events.publish(NetworkEvent::RunCompleted {
            network: self.name.clone(),
            messages: self.history.len(),
            iterations,
            timestamp: Utc::now(),
        });

        info!(
            network = %self.name,
            iterations,
            messages = self.history.len(),
            "Network run completed"
        );

        Ok(self.history.clone())
    }
}

fn preview(input: &str) -> String {
    input.chars().take(PREVIEW_CHARS).collect()
}

/// Builder for [`Network`].
pub struct NetworkBuilder {
    name: String,
    agents: Vec<Agent>,
    router: Option<Router>,
    adapter: Option<Arc<dyn HistoryAdapter>>,
    max_iter: usize,
    events: Option<Arc<EventBus>>,
}

impl NetworkBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agents: Vec::new(),
            router: None,
            adapter: None,
            max_iter: DEFAULT_MAX_ITER,
            events: None,
        }
    }

    /// Register an agent. Names must be unique within the network.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Set the routing policy (required).
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Use a specific history adapter (defaults to in-memory).
    pub fn history_adapter(mut self, adapter: Arc<dyn HistoryAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Bound the number of agent invocations per run (defaults to 10).
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Attach an event bus for run observation.
    pub fn events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<Network> {
        let router = self.router.ok_or_else(|| Error::Config {
            message: format!("network '{}' has no router", self.name),
        })?;

        let mut agents = HashMap::with_capacity(self.agents.len());
        for agent in self.agents {
            let name = agent.name().to_string();
            if agents.insert(name.clone(), agent).is_some() {
                return Err(Error::Config {
                    message: format!("duplicate agent name: {name}"),
                });
            }
        }

        Ok(Network {
            name: self.name,
            agents,
            state: Arc::new(StateStore::new()),
            router,
            history: Vec::new(),
            adapter: self
                .adapter
                .unwrap_or_else(|| Arc::new(InMemoryHistory::new())),
            max_iter: self.max_iter,
            events: self.events.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use swarmlet_core::{ModelConfig, ProviderKind};

    fn scripted_agent(name: &str, replies: Vec<&str>) -> Agent {
        let backend = Arc::new(ScriptedBackend::new(
            replies.into_iter().map(text_result).collect(),
        ));
        Agent::new(
            name,
            "test agent",
            ModelConfig::new(ProviderKind::OpenAi, "mock-model"),
            backend,
        )
    }

    #[test]
    fn builder_requires_router() {
        let result = Network::builder("demo").build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn builder_rejects_duplicate_agent_names() {
        let result = Network::builder("demo")
            .agent(scripted_agent("a", vec![]))
            .agent(scripted_agent("a", vec![]))
            .router(Router::always("a"))
            .build();
        match result {
            Err(Error::Config { message }) => assert!(message.contains("duplicate")),
            _ => panic!("expected config error"),
        }
    }

    #[test]
    fn builder_defaults() {
        let network = Network::builder("demo")
            .agent(scripted_agent("a", vec![]))
            .router(Router::always("a"))
            .build()
            .unwrap();
        assert_eq!(network.max_iter, DEFAULT_MAX_ITER);
        assert!(network.history().is_empty());
        assert_eq!(network.agent_names(), vec!["a"]);
    }

    #[test]
    fn preview_truncates_long_input() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
