//! Routing policy — which agent runs next, or nothing to terminate.
//!
//! A router is a closed two-variant sum: a plain selection function, or an
//! agent whose model decides. Both are consulted fresh every iteration, so a
//! router can change its decision based on the latest history and state —
//! this is how "done" conditions (a sentinel phrase in the last message, a
//! state flag) stop the network.

use crate::agent::Agent;
use swarmlet_core::{Message, StateStore};

/// Read-only views handed to a selector function each iteration.
pub struct RouterArgs<'a> {
    /// The shared history so far (seed message included)
    pub history: &'a [Message],
    /// The run-scoped state store
    pub state: &'a StateStore,
}

/// The routing policy of a network.
pub enum Router {
    /// A selection function returning the next agent's name, or `None` to
    /// terminate.
    Selector(Box<dyn Fn(&RouterArgs<'_>) -> Option<String> + Send + Sync>),

    /// A routing agent: invoked with a serialized `{history, state}` snapshot,
    /// its reply content is looked up verbatim as an agent name. No match
    /// means termination.
    Agent(Box<Agent>),
}

impl Router {
    /// Build a selector-function router.
    pub fn selector(
        select: impl Fn(&RouterArgs<'_>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::Selector(Box::new(select))
    }

    /// Build a routing-agent router.
    pub fn agent(agent: Agent) -> Self {
        Self::Agent(Box::new(agent))
    }

    /// A router that always picks the same agent.
    pub fn always(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::selector(move |_| Some(name.clone()))
    }

    /// A router that runs one agent until the last assistant message contains
    /// a sentinel phrase, then terminates.
    pub fn until_sentinel(name: impl Into<String>, sentinel: impl Into<String>) -> Self {
        let name = name.into();
        let sentinel = sentinel.into();
        Self::selector(move |args| {
            if let Some(last) = args.history.last() {
                if last.content.contains(&sentinel) {
                    return None;
                }
            }
            Some(name.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with<'a>(history: &'a [Message], state: &'a StateStore) -> RouterArgs<'a> {
        RouterArgs { history, state }
    }

    #[test]
    fn always_router_repeats() {
        let router = Router::always("worker");
        let state = StateStore::new();
        let history = vec![Message::user("go")];
        match &router {
            Router::Selector(select) => {
                assert_eq!(
                    select(&args_with(&history, &state)).as_deref(),
                    Some("worker")
                );
                assert_eq!(
                    select(&args_with(&history, &state)).as_deref(),
                    Some("worker")
                );
            }
            _ => panic!("expected selector variant"),
        }
    }

    #[test]
    fn sentinel_router_stops_on_phrase() {
        let router = Router::until_sentinel("worker", "TASK COMPLETE");
        let state = StateStore::new();

        let in_progress = vec![Message::user("go"), Message::assistant("working", "worker")];
        let done = vec![
            Message::user("go"),
            Message::assistant("all set. TASK COMPLETE", "worker"),
        ];

        match &router {
            Router::Selector(select) => {
                assert_eq!(
                    select(&args_with(&in_progress, &state)).as_deref(),
                    Some("worker")
                );
                assert_eq!(select(&args_with(&done, &state)), None);
            }
            _ => panic!("expected selector variant"),
        }
    }

    #[test]
    fn selector_can_read_state() {
        let router = Router::selector(|args| {
            if args.state.has("stop") {
                None
            } else {
                Some("worker".into())
            }
        });
        let state = StateStore::new();
        let history = vec![Message::user("go")];

        match &router {
            Router::Selector(select) => {
                assert!(select(&args_with(&history, &state)).is_some());
                state.set("stop", true).unwrap();
                assert!(select(&args_with(&history, &state)).is_none());
            }
            _ => panic!("expected selector variant"),
        }
    }
}
