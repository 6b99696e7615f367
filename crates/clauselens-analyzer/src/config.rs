//! Configuration for the Analyzer

use clauselens_domain::CompletionParams;
use serde::{Deserialize, Serialize};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default chunk size (characters)
pub const DEFAULT_CHUNK_SIZE: usize = 12_000;

/// How chunked contract text is sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkMode {
    /// Rejoin all chunks with a single space and send one request
    #[default]
    Single,
    /// Send one request per chunk and merge the resulting reports
    PerChunk,
}

/// Configuration for the Analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// OpenAI-compatible API base URL
    pub endpoint: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens the model may generate
    pub max_tokens: u32,

    /// Maximum chunk size (characters)
    pub chunk_size: usize,

    /// Single request or per-chunk requests
    pub chunk_mode: ChunkMode,
}

impl AnalyzerConfig {
    /// Decoding parameters for the completion provider
    pub fn params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        Ok(())
    }

    /// Preset for long contracts: smaller chunks, one request each
    pub fn per_chunk() -> Self {
        Self {
            chunk_size: 6_000,
            chunk_mode: ChunkMode::PerChunk,
            ..Default::default()
        }
    }

    /// Preset for deterministic output
    pub fn deterministic() -> Self {
        Self {
            temperature: 0.0,
            ..Default::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.2,
            max_tokens: 2000,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_mode: ChunkMode::Single,
        }
    }
}
