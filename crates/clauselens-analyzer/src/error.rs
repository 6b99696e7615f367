//! Error types for the Analyzer

use thiserror::Error;

/// Errors raised while pulling text out of a PDF
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The bytes could not be loaded as a PDF document
    #[error("Failed to load PDF: {0}")]
    Load(String),

    /// A page's content could not be decoded
    #[error("Failed to extract text from page {page}: {message}")]
    Page {
        /// 1-based page number
        page: u32,
        /// Underlying parser message
        message: String,
    },
}

/// Errors that abort an analysis run
///
/// Provider failures and malformed model output are not errors here; they
/// end the run in a terminal `RunOutcome` instead.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// PDF extraction failed
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Configuration rejected by `AnalyzerConfig::validate`
    #[error("Configuration error: {0}")]
    Config(String),

    /// The blocking worker running the pipeline did not finish
    #[error("Analysis task failed: {0}")]
    Task(String),
}
