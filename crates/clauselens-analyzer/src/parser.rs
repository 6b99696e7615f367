//! Interpret the raw model answer

use crate::report::AnalysisReport;
use tracing::warn;

/// Prefix marking a requester failure in place of a model answer
pub const ERROR_PREFIX: &str = "API Error";

/// Message shown when the model answer is not valid JSON
pub const INVALID_OUTPUT_MESSAGE: &str = "Model did not return valid JSON. Please try again.";

/// Build the sentinel string for a requester failure
pub fn error_sentinel(message: impl std::fmt::Display) -> String {
    format!("{}: {}", ERROR_PREFIX, message)
}

/// What a raw response turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// The response is an error sentinel; no decoding was attempted
    ApiError(String),

    /// The response is not well-formed JSON
    InvalidOutput {
        /// The response exactly as received
        raw: String,
        /// Decoder message
        reason: String,
    },

    /// The response decoded
    Report(AnalysisReport),
}

/// Classify and decode a raw response
///
/// Decoding is strict: no code fences or surrounding prose are stripped.
pub fn parse_response(raw: &str) -> ParsedResponse {
    if raw.starts_with(ERROR_PREFIX) {
        return ParsedResponse::ApiError(raw.to_string());
    }

    match serde_json::from_str(raw) {
        Ok(value) => ParsedResponse::Report(AnalysisReport::from_value(value)),
        Err(e) => {
            warn!("Model response is not valid JSON: {}", e);
            ParsedResponse::InvalidOutput {
                raw: raw.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clauselens_domain::RiskTreatment;

    #[test]
    fn test_error_sentinel_short_circuits() {
        let parsed = parse_response("API Error: timeout");
        assert_eq!(parsed, ParsedResponse::ApiError("API Error: timeout".to_string()));
    }

    #[test]
    fn test_sentinel_format() {
        assert_eq!(error_sentinel("Rate limit exceeded"), "API Error: Rate limit exceeded");
        assert!(error_sentinel("x").starts_with(ERROR_PREFIX));
    }

    #[test]
    fn test_invalid_json_keeps_raw_text() {
        match parse_response("not json") {
            ParsedResponse::InvalidOutput { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("Expected InvalidOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_code_fenced_json_is_rejected() {
        let response = "```json\n{\"key_parties\": {}}\n```";
        assert!(matches!(parse_response(response), ParsedResponse::InvalidOutput { .. }));
    }

    #[test]
    fn test_truncated_json_is_rejected() {
        let response = r#"{"key_parties": {"Party A": "Acme""#;
        assert!(matches!(parse_response(response), ParsedResponse::InvalidOutput { .. }));
    }

    #[test]
    fn test_valid_json_decodes() {
        let response = r#"{"risk_flags": {"Auto-Renewal Risk": {"risk_level": "High", "explanation": "x"}}}"#;
        let ParsedResponse::Report(report) = parse_response(response) else {
            panic!("Expected a report");
        };
        let flags = report.risk_flags();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].treatment(), RiskTreatment::Alert);
    }

    #[test]
    fn test_unknown_level_is_neutral() {
        let response = r#"{"risk_flags": {"Auto-Renewal Risk": {"risk_level": "Unknown", "explanation": "x"}}}"#;
        let ParsedResponse::Report(report) = parse_response(response) else {
            panic!("Expected a report");
        };
        assert_eq!(report.risk_flags()[0].treatment(), RiskTreatment::Success);
    }

    #[test]
    fn test_whitespace_around_json_is_accepted() {
        let response = "\n  {\"plain_english_summary\": \"ok\"}  \n";
        let ParsedResponse::Report(report) = parse_response(response) else {
            panic!("Expected a report");
        };
        assert_eq!(report.plain_english_summary(), "ok");
    }
}
