//! Groq Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Groq's hosted
//! API is the default target.
//!
//! # Features
//!
//! - Blocking HTTP communication (one request per call, no retries)
//! - Bearer-token authentication
//! - Configurable endpoint
//!
//! # Examples
//!
//! ```no_run
//! use clauselens_llm::GroqProvider;
//!
//! let provider = GroqProvider::new("gsk_example_key").unwrap();
//! ```

use crate::LlmError;
use clauselens_domain::{ChatMessage, CompletionParams, CompletionProvider};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Groq OpenAI-compatible API base
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// OpenAI-compatible chat completion provider
///
/// The underlying client is built once and reused for every call. Timeouts
/// are the HTTP client's defaults.
pub struct GroqProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a provider for the default Groq endpoint
    ///
    /// An empty key is accepted here; the provider will report an
    /// authentication failure when a request is made.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a provider for a specific OpenAI-compatible API base
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL, e.g. "https://api.groq.com/openai/v1"
    /// - `api_key`: Bearer credential
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Full URL of the completions route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

fn build_request<'a>(
    messages: &'a [ChatMessage],
    params: &'a CompletionParams,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &params.model,
        messages: messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect(),
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    }
}

/// Pull the first choice's text out of a response body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            LlmError::InvalidResponse("Response contained no message content".to_string())
        })
}

fn status_error(status: StatusCode, body: String, model: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

impl CompletionProvider for GroqProvider {
    type Error = LlmError;

    fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, Self::Error> {
        let url = self.completions_url();
        let body = build_request(messages, params);

        debug!(model = %params.model, messages = messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, text, &params.model));
        }

        parse_completion(&text)
    }
}
