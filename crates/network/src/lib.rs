//! The orchestration engine — the heart of Swarmlet.
//!
//! Two layers:
//!
//! 1. **Agent invocation cycle** ([`Agent::invoke`]): resolve the system
//!    prompt, replay the network history (or wrap the seed input), ask the
//!    model backend for a response, execute any requested tool calls in order,
//!    and fold their results into the textual output.
//! 2. **Network loop** ([`Network::run`]): seed history with the user input,
//!    then repeatedly ask the router for the next agent, invoke it, and append
//!    its reply to the shared history — until the router signals termination
//!    or the iteration budget is exhausted.

pub mod agent;
pub mod network;
pub mod router;
pub mod test_helpers;

pub use agent::{Agent, SystemPrompt};
pub use network::{Network, NetworkBuilder};
pub use router::{Router, RouterArgs};
