//! Message domain types.
//!
//! Messages are the value objects the whole system turns on: the network seeds
//! history with a user message, each agent turn appends an assistant message,
//! and the accumulated sequence is replayed verbatim to model backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// An agent's response
    Assistant,
    /// Tool output
    Tool,
}

/// A single message in a network's shared history.
///
/// Ordered and append-only within a run; the order is semantically significant
/// because it is the literal context replayed to the model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Name of the agent that produced this message (assistant entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            agent: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message attributed to the given agent.
    pub fn assistant(content: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            agent: Some(agent.into()),
            timestamp: Utc::now(),
        }
    }

    /// Create a tool output message.
    pub fn tool_output(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Tool,
            content: content.into(),
            agent: None,
            timestamp: Utc::now(),
        }
    }
}
