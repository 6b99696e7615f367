//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::message::{ChatMessage, CompletionParams};

/// Trait for chat-completion providers
///
/// Implemented by the infrastructure layer (clauselens-llm). Calls are
/// blocking; async callers should move them onto a blocking thread.
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error;

    /// Send a message list and return the model's text answer
    fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, Self::Error>;
}
