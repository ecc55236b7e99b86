//! History adapter — pluggable append-only message persistence.
//!
//! A thread is an opaque identifier scoping one persisted conversation. The
//! network obtains a thread at the start of a run and appends the accumulated
//! history exactly once when the run ends; `append_results` concatenates, so
//! calling it twice duplicates entries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::HistoryError;
use crate::message::Message;

/// Opaque identifier for a persisted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The constant identifier used when an adapter has no thread creation.
    pub fn fallback() -> Self {
        Self("default".into())
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The history persistence trait.
///
/// Implementations: in-memory (default), or anything that can log messages
/// under an opaque thread id.
#[async_trait]
pub trait HistoryAdapter: Send + Sync {
    /// Open a fresh thread.
    ///
    /// Adapters without thread creation keep this default, which hands back
    /// the constant `"default"` identifier.
    async fn create_thread(&self) -> std::result::Result<ThreadId, HistoryError> {
        Ok(ThreadId::fallback())
    }

    /// Read all messages persisted under a thread. Unknown threads read empty.
    async fn get(&self, thread: &ThreadId) -> std::result::Result<Vec<Message>, HistoryError>;

    /// Append messages to a thread, preserving prior entries.
    async fn append_results(
        &self,
        thread: &ThreadId,
        messages: &[Message],
    ) -> std::result::Result<(), HistoryError>;
}

/// The default in-memory history adapter.
pub struct InMemoryHistory {
    threads: Mutex<HashMap<String, Vec<Message>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self {
            threads: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryAdapter for InMemoryHistory {
    async fn create_thread(&self) -> std::result::Result<ThreadId, HistoryError> {
        let id = ThreadId::new();
        let mut threads = self.threads.lock().expect("history lock poisoned");
        threads.insert(id.0.clone(), Vec::new());
        Ok(id)
    }

    async fn get(&self, thread: &ThreadId) -> std::result::Result<Vec<Message>, HistoryError> {
        let threads = self.threads.lock().expect("history lock poisoned");
        Ok(threads.get(&thread.0).cloned().unwrap_or_default())
    }

    async fn append_results(
        &self,
        thread: &ThreadId,
        messages: &[Message],
    ) -> std::result::Result<(), HistoryError> {
        let mut threads = self.threads.lock().expect("history lock poisoned");
        threads
            .entry(thread.0.clone())
            .or_default()
            .extend_from_slice(messages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_thread_assigns_unique_ids() {
        let history = InMemoryHistory::new();
        let a = history.create_thread().await.unwrap();
        let b = history.create_thread().await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn fresh_thread_reads_empty() {
        let history = InMemoryHistory::new();
        let thread = history.create_thread().await.unwrap();
        assert!(history.get(&thread).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_thread_reads_empty() {
        let history = InMemoryHistory::new();
        let messages = history.get(&ThreadId::fallback()).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn append_concatenates() {
        let history = InMemoryHistory::new();
        let thread = history.create_thread().await.unwrap();

        history
            .append_results(&thread, &[Message::user("first")])
            .await
            .unwrap();
        history
            .append_results(&thread, &[Message::assistant("second", "a")])
            .await
            .unwrap();

        let messages = history.get(&thread).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
    }

    #[tokio::test]
    async fn append_to_unknown_thread_creates_it() {
        let history = InMemoryHistory::new();
        let thread = ThreadId::fallback();
        history
            .append_results(&thread, &[Message::user("seed")])
            .await
            .unwrap();
        assert_eq!(history.get(&thread).await.unwrap().len(), 1);
    }

    struct NoThreadAdapter;

    #[async_trait]
    impl HistoryAdapter for NoThreadAdapter {
        async fn get(
            &self,
            _thread: &ThreadId,
        ) -> std::result::Result<Vec<Message>, HistoryError> {
            Ok(Vec::new())
        }

        async fn append_results(
            &self,
            _thread: &ThreadId,
            _messages: &[Message],
        ) -> std::result::Result<(), HistoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_create_thread_falls_back() {
        let adapter = NoThreadAdapter;
        let thread = adapter.create_thread().await.unwrap();
        assert_eq!(thread, ThreadId::fallback());
        assert_eq!(thread.to_string(), "default");
    }
}
