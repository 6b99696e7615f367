//! Core Analyzer implementation

use crate::chunking::TextChunker;
use crate::config::{AnalyzerConfig, ChunkMode};
use crate::error::AnalyzerError;
use crate::merge::merge_reports;
use crate::parser::{error_sentinel, parse_response, ParsedResponse};
use crate::pdf::extract_text_from_pdf;
use crate::prompt::PromptBuilder;
use crate::types::{ContractInput, InputSource, RunOutcome, RunState};
use clauselens_domain::traits::CompletionProvider;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Analyzer turns contract text into a structured report
///
/// The provider is created once per process and shared read-only by every
/// run. A run is synchronous from input to terminal state.
pub struct Analyzer<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    config: AnalyzerConfig,
    chunker: TextChunker,
}

impl<P> Analyzer<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a new Analyzer
    ///
    /// Fails with [`AnalyzerError::Config`] when `config` does not validate.
    pub fn new(provider: P, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::with_shared_provider(Arc::new(provider), config)
    }

    /// Create a new Analyzer around a provider that is also held elsewhere
    pub fn with_shared_provider(
        provider: Arc<P>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;
        let chunker = TextChunker::new(config.chunk_size);

        Ok(Self {
            provider,
            config,
            chunker,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Send one contract to the model
    ///
    /// Returns the model text verbatim, or an `"API Error: ..."` sentinel
    /// when the provider fails for any reason. Never fails itself.
    pub fn request_report(&self, text: &str) -> String {
        let messages = PromptBuilder::new(text).build();
        let params = self.config.params();

        debug!("Requesting report: {} chars of contract text", text.len());

        match self.provider.complete(&messages, &params) {
            Ok(response) => {
                debug!("LLM response length: {} chars", response.len());
                response
            }
            Err(e) => {
                warn!("Completion request failed: {}", e);
                error_sentinel(e)
            }
        }
    }

    /// Run the whole pipeline for one submission
    ///
    /// `Idle → Extracting → Requesting → terminal`. Only a PDF extraction
    /// failure is returned as an error; every other failure is a terminal
    /// `RunOutcome`.
    pub fn run(&self, input: ContractInput) -> Result<RunOutcome, AnalyzerError> {
        let start = Instant::now();
        debug!(state = ?RunState::Idle, "Run started");

        let text = match input.into_source() {
            InputSource::Missing => {
                info!("No contract supplied");
                return Ok(RunOutcome::MissingInput);
            }
            InputSource::Pdf(bytes) => {
                debug!(state = ?RunState::Extracting, "Extracting {} PDF bytes", bytes.len());
                extract_text_from_pdf(&bytes)?
            }
            InputSource::Text(text) => text,
        };

        debug!(state = ?RunState::Requesting, "Contract text length {}", text.len());
        let outcome = self.analyze_text(&text);

        info!(
            state = ?outcome.terminal_state(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(outcome)
    }

    /// Chunk, request and parse already extracted text
    pub fn analyze_text(&self, text: &str) -> RunOutcome {
        let chunks = self.chunker.chunk(text);

        info!("Split text into {} chunks", chunks.len());

        if self.config.chunk_mode == ChunkMode::PerChunk && chunks.len() > 1 {
            return self.analyze_chunks(&chunks);
        }

        let combined = chunks.join(" ");
        outcome_from(parse_response(&self.request_report(&combined)))
    }

    /// One request per chunk; the first failing chunk ends the run
    fn analyze_chunks(&self, chunks: &[&str]) -> RunOutcome {
        let mut reports = Vec::with_capacity(chunks.len());

        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Processing chunk {}/{}", idx + 1, chunks.len());

            match parse_response(&self.request_report(chunk)) {
                ParsedResponse::Report(report) => reports.push(report),
                failure => {
                    warn!("Chunk {} did not produce a report", idx + 1);
                    return outcome_from(failure);
                }
            }
        }

        RunOutcome::Rendered(merge_reports(&reports))
    }
}

impl<P> Analyzer<P>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    /// Run the pipeline on the blocking pool
    ///
    /// The provider call blocks, so async callers hand the whole run to a
    /// blocking thread.
    pub async fn run_blocking(
        self: Arc<Self>,
        input: ContractInput,
    ) -> Result<RunOutcome, AnalyzerError> {
        tokio::task::spawn_blocking(move || self.run(input))
            .await
            .map_err(|e| AnalyzerError::Task(e.to_string()))?
    }
}

fn outcome_from(parsed: ParsedResponse) -> RunOutcome {
    match parsed {
        ParsedResponse::ApiError(message) => RunOutcome::ApiError(message),
        ParsedResponse::InvalidOutput { raw, .. } => RunOutcome::InvalidOutput(raw),
        ParsedResponse::Report(report) => RunOutcome::Rendered(report),
    }
}
