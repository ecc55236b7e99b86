//! Scripted backends and response constructors for tests.

use async_trait::async_trait;
use std::sync::Mutex;
use swarmlet_core::error::BackendError;
use swarmlet_core::{CompletionRequest, InterfaceResult, ModelBackend, ToolRequest, Usage};

/// A scripted backend that returns a queue of canned responses.
///
/// Each call to `complete` returns the next response and records the request
/// for later assertions. Panics if more calls are made than responses
/// provided.
pub struct ScriptedBackend {
    responses: Mutex<Vec<InterfaceResult>>,
    requests: Mutex<Vec<CompletionRequest>>,
    call_count: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<InterfaceResult>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// A backend that returns a single text response (no tool calls).
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![text_result(text)])
    }

    /// How many completions have been served.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<InterfaceResult, BackendError> {
        self.requests.lock().unwrap().push(request);

        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if *count >= responses.len() {
            panic!(
                "ScriptedBackend: no more responses (call #{}, have {})",
                *count,
                responses.len()
            );
        }

        let response = responses[*count].clone();
        *count += 1;
        Ok(response)
    }
}

/// A backend that always fails with a network error.
pub struct FailingBackend;

#[async_trait]
impl ModelBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> std::result::Result<InterfaceResult, BackendError> {
        Err(BackendError::Network("connection refused".into()))
    }
}

/// A simple text response (no tool calls).
pub fn text_result(text: &str) -> InterfaceResult {
    InterfaceResult {
        content: text.to_string(),
        tool_calls: Vec::new(),
        usage: Usage {
            tokens: 15,
            time_ms: 3,
        },
    }
}

/// A response requesting tool calls, with optional thought content.
pub fn tool_call_result(tool_calls: Vec<ToolRequest>, thought: &str) -> InterfaceResult {
    InterfaceResult {
        content: thought.to_string(),
        tool_calls,
        usage: Usage {
            tokens: 15,
            time_ms: 3,
        },
    }
}

/// A tool request.
pub fn tool_request(name: &str, arguments: serde_json::Value) -> ToolRequest {
    ToolRequest {
        name: name.to_string(),
        arguments,
    }
}
