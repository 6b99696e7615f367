//! Chat messages and completion parameters

use std::fmt;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Fixed instructions that frame the task
    System,

    /// Content supplied on behalf of the end user
    User,
}

impl Role {
    /// Wire name of the role, as used by OpenAI-compatible APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author role
    pub role: Role,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system-role message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Model selection and decoding settings for one completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    /// Model identifier understood by the provider
    pub model: String,

    /// Sampling temperature; low values keep output close to deterministic
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}
