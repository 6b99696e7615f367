//! ClauseLens Analyzer
//!
//! Turns a contract into a structured review using an LLM.
//!
//! # Overview
//!
//! A run takes an uploaded PDF or pasted text, extracts the contract text,
//! sends it to a completion provider with fixed review instructions, and
//! decodes the model's JSON answer into an [`AnalysisReport`].
//!
//! # Architecture
//!
//! ```text
//! Input → PDF extraction → Chunking → Requester → Parser → RunOutcome
//! ```
//!
//! Provider failures become an `"API Error: ..."` sentinel and end the run
//! as [`RunOutcome::ApiError`]; undecodable answers end it as
//! [`RunOutcome::InvalidOutput`]. Only an invalid configuration or a PDF
//! extraction failure surfaces as [`AnalyzerError`].
//!
//! # Example Usage
//!
//! ```
//! use clauselens_analyzer::{Analyzer, AnalyzerConfig, ContractInput, RunOutcome};
//! use clauselens_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"{"plain_english_summary": "A simple lease."}"#);
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();
//!
//! let outcome = analyzer.run(ContractInput::from_text("Sample contract body")).unwrap();
//! match outcome {
//!     RunOutcome::Rendered(report) => {
//!         assert_eq!(report.plain_english_summary(), "A simple lease.");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod chunking;
mod config;
mod error;
mod merge;
mod parser;
mod pdf;
mod prompt;
mod report;
mod types;

#[cfg(test)]
mod tests;

pub use analyzer::Analyzer;
pub use chunking::TextChunker;
pub use config::{AnalyzerConfig, ChunkMode, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL};
pub use error::{AnalyzerError, ExtractError};
pub use merge::merge_reports;
pub use parser::{
    error_sentinel, parse_response, ParsedResponse, ERROR_PREFIX, INVALID_OUTPUT_MESSAGE,
};
pub use pdf::extract_text_from_pdf;
pub use prompt::{PromptBuilder, RISK_CATEGORIES, SYSTEM_PROMPT};
pub use report::{AnalysisReport, RiskFlag, MAPPING_SECTIONS};
pub use types::{ContractInput, InputSource, RunOutcome, RunState};
