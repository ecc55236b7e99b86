//! Network event system — structured observation of a run.
//!
//! The network and its agents publish events at well-defined points
//! (run lifecycle, router decisions, pre/post agent invocation, tool-call
//! start/end). Observers subscribe without coupling to the run loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All events emitted during a network run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NetworkEvent {
    /// A run began with the seeded user input
    RunStarted {
        network: String,
        input_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// The router made a decision (`None` means termination)
    RouterSelected {
        network: String,
        agent: Option<String>,
        iteration: usize,
        timestamp: DateTime<Utc>,
    },

    /// An agent is about to be invoked
    AgentInvoked {
        agent: String,
        iteration: usize,
        timestamp: DateTime<Utc>,
    },

    /// An agent invocation completed
    AgentCompleted {
        agent: String,
        tokens: u32,
        time_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A tool handler is about to run
    ToolCallStarted {
        agent: String,
        tool: String,
        timestamp: DateTime<Utc>,
    },

    /// A tool handler finished
    ToolCallFinished {
        agent: String,
        tool: String,
        time_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The run loop ended (router termination or budget exhaustion)
    RunCompleted {
        network: String,
        messages: usize,
        iterations: usize,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based bus for network events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Publishing with
/// no subscribers is a no-op.
pub struct EventBus {
    sender: broadcast::Sender<Arc<NetworkEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: NetworkEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<NetworkEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
