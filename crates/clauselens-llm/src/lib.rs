//! ClauseLens LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `clauselens-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing, records every call
//! - `GroqProvider`: OpenAI-compatible chat completions over HTTP (Groq by default)
//!
//! # Examples
//!
//! ```
//! use clauselens_llm::MockProvider;
//! use clauselens_domain::{ChatMessage, CompletionParams, CompletionProvider};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let params = CompletionParams {
//!     model: "test-model".to_string(),
//!     temperature: 0.2,
//!     max_tokens: 16,
//! };
//! let result = provider.complete(&[ChatMessage::user("hi")], &params).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod groq;

use clauselens_domain::{ChatMessage, CompletionParams, CompletionProvider, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use groq::GroqProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

const ERROR_MARKER: &str = "ERROR";

/// One recorded call to a `MockProvider`
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Messages as sent
    pub messages: Vec<ChatMessage>,
    /// Parameters as sent
    pub params: CompletionParams,
}

impl RecordedCall {
    /// Content of the first user-role message, if any
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be keyed on the user message content; anything else gets
/// the default response.
///
/// # Examples
///
/// ```
/// use clauselens_llm::MockProvider;
/// use clauselens_domain::{ChatMessage, CompletionParams, CompletionProvider};
///
/// let params = CompletionParams {
///     model: "m".to_string(),
///     temperature: 0.0,
///     max_tokens: 1,
/// };
///
/// let mut provider = MockProvider::default();
/// provider.add_response("first", "one");
/// provider.add_response("second", "two");
/// assert_eq!(provider.complete(&[ChatMessage::user("first")], &params).unwrap(), "one");
/// assert_eq!(provider.complete(&[ChatMessage::user("second")], &params).unwrap(), "two");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every call
    pub fn failing() -> Self {
        Self::new(ERROR_MARKER)
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user_content: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_content.into(), response.into());
    }

    /// Configure to return an error for a specific user message
    pub fn add_error(&mut self, user_content: impl Into<String>) {
        self.add_response(user_content, ERROR_MARKER);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of every recorded call, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, Self::Error> {
        let call = RecordedCall {
            messages: messages.to_vec(),
            params: params.clone(),
        };
        let key = call.user_content().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(call);

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        if response == ERROR_MARKER {
            return Err(LlmError::Other("Mock error".to_string()));
        }
        Ok(response)
    }
}
