//! # Swarmlet Core
//!
//! Domain types, traits, and error definitions for the Swarmlet multi-agent
//! orchestration runtime. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod backend;
pub mod context;
pub mod error;
pub mod event;
pub mod history;
pub mod message;
pub mod state;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use backend::{
    CompletionRequest, InterfaceResult, ModelBackend, ModelConfig, ProviderKind, ToolDefinition,
    ToolRequest, Usage,
};
pub use context::{NetworkContext, NetworkView};
pub use error::{Error, Result};
pub use event::{EventBus, NetworkEvent};
pub use history::{HistoryAdapter, InMemoryHistory, ThreadId};
pub use message::{Message, Role};
pub use state::StateStore;
pub use tool::{Tool, ToolSet};
