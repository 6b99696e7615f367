//! Types for analysis requests and results

use crate::report::AnalysisReport;

/// A user's submission: an uploaded PDF, pasted text, or both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractInput {
    /// Raw PDF bytes
    pub pdf: Option<Vec<u8>>,

    /// Pasted contract text
    pub text: Option<String>,
}

/// The input a run actually uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// PDF bytes to extract
    Pdf(Vec<u8>),
    /// Text used as-is
    Text(String),
    /// Nothing usable was supplied
    Missing,
}

impl ContractInput {
    /// Submission holding only pasted text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pdf: None,
            text: Some(text.into()),
        }
    }

    /// Submission holding only a PDF
    pub fn from_pdf(bytes: Vec<u8>) -> Self {
        Self {
            pdf: Some(bytes),
            text: None,
        }
    }

    /// Pick the input to analyze
    ///
    /// A non-empty PDF takes precedence over text. Empty uploads and empty
    /// text count as not supplied.
    pub fn into_source(self) -> InputSource {
        match (self.pdf, self.text) {
            (Some(bytes), _) if !bytes.is_empty() => InputSource::Pdf(bytes),
            (_, Some(text)) if !text.is_empty() => InputSource::Text(text),
            _ => InputSource::Missing,
        }
    }
}

/// States of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for input
    Idle,
    /// Pulling text out of a PDF
    Extracting,
    /// Waiting on the model
    Requesting,
    /// No input supplied; nothing was requested
    MissingInput,
    /// The requester returned an error sentinel
    ErrorTerminal,
    /// The model answer did not decode
    ParseFailureTerminal,
    /// A report decoded and can be rendered
    RenderedTerminal,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Neither a PDF nor text was supplied
    MissingInput,
    /// The request failed; carries the full sentinel message
    ApiError(String),
    /// The model answer was not valid JSON; carries the raw answer
    InvalidOutput(String),
    /// The decoded report
    Rendered(AnalysisReport),
}

impl RunOutcome {
    /// Terminal state this outcome corresponds to
    pub fn terminal_state(&self) -> RunState {
        match self {
            RunOutcome::MissingInput => RunState::MissingInput,
            RunOutcome::ApiError(_) => RunState::ErrorTerminal,
            RunOutcome::InvalidOutput(_) => RunState::ParseFailureTerminal,
            RunOutcome::Rendered(_) => RunState::RenderedTerminal,
        }
    }

    /// The report, when the run rendered one
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            RunOutcome::Rendered(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_takes_precedence() {
        let input = ContractInput {
            pdf: Some(b"%PDF".to_vec()),
            text: Some("pasted".to_string()),
        };
        assert_eq!(input.into_source(), InputSource::Pdf(b"%PDF".to_vec()));
    }

    #[test]
    fn test_empty_pdf_falls_back_to_text() {
        let input = ContractInput {
            pdf: Some(Vec::new()),
            text: Some("pasted".to_string()),
        };
        assert_eq!(input.into_source(), InputSource::Text("pasted".to_string()));
    }

    #[test]
    fn test_nothing_supplied() {
        assert_eq!(ContractInput::default().into_source(), InputSource::Missing);
        assert_eq!(ContractInput::from_text("").into_source(), InputSource::Missing);
    }

    #[test]
    fn test_terminal_states() {
        assert_eq!(RunOutcome::MissingInput.terminal_state(), RunState::MissingInput);
        assert_eq!(
            RunOutcome::ApiError("API Error: x".into()).terminal_state(),
            RunState::ErrorTerminal
        );
        assert_eq!(
            RunOutcome::InvalidOutput("x".into()).terminal_state(),
            RunState::ParseFailureTerminal
        );
        assert!(RunOutcome::InvalidOutput("x".into()).report().is_none());
    }
}
