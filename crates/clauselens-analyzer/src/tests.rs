//! Integration tests for the Analyzer

#[cfg(test)]
mod tests {
    use crate::{
        Analyzer, AnalyzerConfig, ChunkMode, ContractInput, RunOutcome, RunState, SYSTEM_PROMPT,
    };
    use clauselens_domain::{RiskTreatment, Role};
    use clauselens_llm::MockProvider;
    use std::sync::Arc;

    const FULL_REPORT: &str = r#"{
        "key_parties": {"Party A": "Acme Corp", "Party B": "Globex LLC", "Additional Parties": "Not Found"},
        "contract_overview": {"Contract Type": "Services Agreement", "Effective Date": "2024-01-01"},
        "payment_terms": {"Payment Amount": "$10,000", "Payment Frequency": "Monthly"},
        "termination": {"Notice Period": "30 days"},
        "confidentiality_clause": {"Present": "Yes", "Summary": "Mutual NDA"},
        "risk_flags": {
            "Auto-Renewal Risk": {"risk_level": "High", "explanation": "Renews silently", "exact_clause_excerpt": "shall renew automatically"},
            "Liability & Indemnity Risk": {"risk_level": "Medium", "explanation": "Uncapped", "exact_clause_excerpt": "indemnify"},
            "Missing Exit Clause Risk": {"risk_level": "Low", "explanation": "Exit exists", "exact_clause_excerpt": "may terminate"},
            "Intellectual Property Ownership Risk": {"risk_level": "Unknown", "explanation": "Unclear", "exact_clause_excerpt": "Not Found"}
        },
        "plain_english_summary": "Acme provides services to Globex."
    }"#;

    #[test]
    fn test_full_analysis_flow() {
        let llm = MockProvider::new(FULL_REPORT);
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let outcome = analyzer
            .run(ContractInput::from_text("Sample contract body"))
            .unwrap();

        assert_eq!(outcome.terminal_state(), RunState::RenderedTerminal);
        let report = outcome.report().expect("report");

        assert_eq!(report.key_parties()["Party A"], "Acme Corp");
        assert_eq!(report.contract_overview()["Contract Type"], "Services Agreement");
        assert_eq!(report.payment_terms()["Payment Frequency"], "Monthly");
        assert_eq!(report.termination()["Notice Period"], "30 days");
        assert_eq!(report.confidentiality_clause()["Present"], "Yes");
        assert_eq!(report.plain_english_summary(), "Acme provides services to Globex.");

        let treatments: Vec<_> = report.risk_flags().iter().map(|f| f.treatment()).collect();
        assert_eq!(
            treatments,
            vec![
                RiskTreatment::Alert,
                RiskTreatment::Warning,
                RiskTreatment::Success,
                RiskTreatment::Success
            ]
        );

        // One request: fixed system prompt, then the pasted text verbatim
        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 2);
        assert_eq!(calls[0].messages[0].role, Role::System);
        assert_eq!(calls[0].messages[0].content, SYSTEM_PROMPT);
        assert_eq!(calls[0].messages[1].role, Role::User);
        assert_eq!(calls[0].messages[1].content, "Sample contract body");

        let expected: serde_json::Value = serde_json::from_str(FULL_REPORT).unwrap();
        assert_eq!(
            report.to_pretty_json().unwrap(),
            serde_json::to_string_pretty(&expected).unwrap()
        );
    }

    #[test]
    fn test_api_failure_ends_in_error_state() {
        let analyzer = Analyzer::new(MockProvider::failing(), AnalyzerConfig::default()).unwrap();
        let outcome = analyzer.run(ContractInput::from_text("Some text")).unwrap();

        match outcome {
            RunOutcome::ApiError(message) => assert!(message.starts_with("API Error")),
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_model_sentinel_text_is_treated_as_error() {
        let analyzer = Analyzer::new(
            MockProvider::new("API Error: timeout"),
            AnalyzerConfig::default(),
        )
        .unwrap();
        let outcome = analyzer.run(ContractInput::from_text("Some text")).unwrap();
        assert_eq!(outcome, RunOutcome::ApiError("API Error: timeout".to_string()));
    }

    #[test]
    fn test_invalid_json_ends_in_parse_failure() {
        let analyzer = Analyzer::new(MockProvider::new("not json"), AnalyzerConfig::default())
            .unwrap();
        let outcome = analyzer.run(ContractInput::from_text("Some text")).unwrap();
        assert_eq!(outcome, RunOutcome::InvalidOutput("not json".to_string()));
        assert_eq!(outcome.terminal_state(), RunState::ParseFailureTerminal);
    }

    #[test]
    fn test_partial_report_degrades_silently() {
        let analyzer = Analyzer::new(
            MockProvider::new(r#"{"key_parties": {"Party A": "Acme"}}"#),
            AnalyzerConfig::default(),
        )
        .unwrap();
        let outcome = analyzer.run(ContractInput::from_text("Some text")).unwrap();
        let report = outcome.report().expect("report");

        assert_eq!(report.key_parties()["Party A"], "Acme");
        assert!(report.payment_terms().as_object().unwrap().is_empty());
        assert!(report.risk_flags().is_empty());
        assert_eq!(report.plain_english_summary(), "");
    }

    #[test]
    fn test_per_chunk_mode_sends_each_chunk() {
        let mut llm = MockProvider::new("{}");
        llm.add_response(
            "aaaa",
            r#"{"key_parties": {"Party A": "Acme"}, "risk_flags": {"Auto-Renewal Risk": {"risk_level": "Low"}}, "plain_english_summary": "First."}"#,
        );
        llm.add_response(
            "bbbb",
            r#"{"key_parties": {"Party B": "Globex"}, "risk_flags": {"Auto-Renewal Risk": {"risk_level": "High"}}, "plain_english_summary": "Second."}"#,
        );
        let config = AnalyzerConfig {
            chunk_size: 4,
            chunk_mode: ChunkMode::PerChunk,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(llm.clone(), config).unwrap();

        let outcome = analyzer.run(ContractInput::from_text("aaaabbbb")).unwrap();
        let report = outcome.report().expect("report");

        assert_eq!(llm.call_count(), 2);
        assert_eq!(report.key_parties()["Party A"], "Acme");
        assert_eq!(report.key_parties()["Party B"], "Globex");
        assert_eq!(report.risk_flags()[0].treatment(), RiskTreatment::Alert);
        assert_eq!(report.plain_english_summary(), "First.\n\nSecond.");
    }

    #[test]
    fn test_per_chunk_mode_stops_at_first_failure() {
        let mut llm = MockProvider::new("{}");
        llm.add_response("aaaa", "oops");
        let config = AnalyzerConfig {
            chunk_size: 4,
            chunk_mode: ChunkMode::PerChunk,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(llm.clone(), config).unwrap();

        let outcome = analyzer.run(ContractInput::from_text("aaaabbbbcccc")).unwrap();
        assert_eq!(outcome, RunOutcome::InvalidOutput("oops".to_string()));
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_per_chunk_mode_single_chunk_uses_one_request() {
        let llm = MockProvider::new("{}");
        let config = AnalyzerConfig {
            chunk_mode: ChunkMode::PerChunk,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(llm.clone(), config).unwrap();

        analyzer.run(ContractInput::from_text("short")).unwrap();
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_empty_text_still_single_request_when_forced() {
        let llm = MockProvider::new("{}");
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        analyzer.analyze_text("");
        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_content(), Some(""));
    }

    #[tokio::test]
    async fn test_run_blocking() {
        let llm = MockProvider::new(FULL_REPORT);
        let analyzer = Arc::new(Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap());

        let outcome = analyzer
            .run_blocking(ContractInput::from_text("Sample contract body"))
            .await
            .unwrap();

        assert_eq!(outcome.terminal_state(), RunState::RenderedTerminal);
        assert_eq!(llm.call_count(), 1);
    }
}
