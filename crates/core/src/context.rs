//! Invocation context — explicit, passed by value at every call boundary.
//!
//! System-prompt resolvers and tool handlers receive a [`NetworkContext`]
//! describing the invocation's surroundings. When an agent runs inside a
//! network, the context carries a [`NetworkView`]: the network's name, its
//! agent roster, the shared state store, and a snapshot of history taken at
//! invocation time. No component ever holds a mutable reference to the
//! network's history — the network owns that sequence exclusively.

use std::sync::Arc;

use crate::message::Message;
use crate::state::StateStore;

/// Context supplied to an agent invocation and forwarded to its tools.
#[derive(Clone, Default)]
pub struct NetworkContext {
    /// Present when the invocation happens inside a network run.
    pub network: Option<NetworkView>,
}

impl NetworkContext {
    /// Context for an invocation with no owning network.
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Context carrying a view of the owning network.
    pub fn within(view: NetworkView) -> Self {
        Self {
            network: Some(view),
        }
    }

    /// The network's history snapshot, or an empty slice when standalone.
    pub fn history(&self) -> &[Message] {
        self.network
            .as_ref()
            .map(|view| view.history.as_slice())
            .unwrap_or(&[])
    }

    /// The shared state store, when running inside a network.
    pub fn state(&self) -> Option<&Arc<StateStore>> {
        self.network.as_ref().map(|view| &view.state)
    }
}

/// A read-only view of the owning network at one point in time.
#[derive(Clone)]
pub struct NetworkView {
    /// The network's name
    pub name: String,

    /// Names of all agents registered in the network
    pub agents: Vec<String>,

    /// Shared run-scoped state (writable through interior mutability)
    pub state: Arc<StateStore>,

    /// Snapshot of the shared history at invocation time
    pub history: Vec<Message>,
}
