//! The decoded analysis report

use clauselens_domain::RiskTreatment;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Top-level key: parties to the contract
pub const KEY_PARTIES: &str = "key_parties";
/// Top-level key: contract type, dates, duration, renewal
pub const CONTRACT_OVERVIEW: &str = "contract_overview";
/// Top-level key: amounts, frequency, late fees
pub const PAYMENT_TERMS: &str = "payment_terms";
/// Top-level key: termination conditions and notice
pub const TERMINATION: &str = "termination";
/// Top-level key: confidentiality clause
pub const CONFIDENTIALITY_CLAUSE: &str = "confidentiality_clause";
/// Top-level key: risk category → details
pub const RISK_FLAGS: &str = "risk_flags";
/// Top-level key: free-text summary
pub const PLAIN_ENGLISH_SUMMARY: &str = "plain_english_summary";

/// Mapping-valued sections in display order, with their titles
pub const MAPPING_SECTIONS: [(&str, &str); 5] = [
    (KEY_PARTIES, "Key Parties"),
    (CONTRACT_OVERVIEW, "Contract Overview"),
    (PAYMENT_TERMS, "Payment Terms"),
    (TERMINATION, "Termination"),
    (CONFIDENTIALITY_CLAUSE, "Confidentiality"),
];

/// A report decoded from the model's JSON answer
///
/// Any well-formed JSON is accepted. Field access goes through accessors
/// with documented defaults, so missing or mistyped fields read as empty
/// rather than failing. The decoded value is kept whole for download.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisReport {
    value: Value,
}

/// One entry of the `risk_flags` mapping
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFlag<'a> {
    /// Category name, e.g. "Auto-Renewal Risk"
    pub category: &'a str,
    /// `risk_level` when present as a string
    pub risk_level: Option<&'a str>,
    /// `explanation` when present as a string
    pub explanation: Option<&'a str>,
    /// `exact_clause_excerpt` when present as a string
    pub excerpt: Option<&'a str>,
}

impl RiskFlag<'_> {
    /// Visual treatment for this flag's level
    pub fn treatment(&self) -> RiskTreatment {
        RiskTreatment::classify(self.risk_level)
    }
}

impl AnalysisReport {
    /// Wrap an already decoded JSON value
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// The decoded value as received
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the report, returning the decoded value
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Top-level field, if the report is an object holding it
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.value.as_object().and_then(|obj| obj.get(key))
    }

    /// A mapping-valued section; an empty mapping when absent
    pub fn section(&self, key: &str) -> Cow<'_, Value> {
        match self.field(key) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(Value::Object(Map::new())),
        }
    }

    /// `key_parties`; empty mapping when absent
    pub fn key_parties(&self) -> Cow<'_, Value> {
        self.section(KEY_PARTIES)
    }

    /// `contract_overview`; empty mapping when absent
    pub fn contract_overview(&self) -> Cow<'_, Value> {
        self.section(CONTRACT_OVERVIEW)
    }

    /// `payment_terms`; empty mapping when absent
    pub fn payment_terms(&self) -> Cow<'_, Value> {
        self.section(PAYMENT_TERMS)
    }

    /// `termination`; empty mapping when absent
    pub fn termination(&self) -> Cow<'_, Value> {
        self.section(TERMINATION)
    }

    /// `confidentiality_clause`; empty mapping when absent
    pub fn confidentiality_clause(&self) -> Cow<'_, Value> {
        self.section(CONFIDENTIALITY_CLAUSE)
    }

    /// `plain_english_summary`; empty string when absent or not a string
    pub fn plain_english_summary(&self) -> &str {
        self.field(PLAIN_ENGLISH_SUMMARY)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// `risk_flags` entries in decoded order; none when absent or not a mapping
    ///
    /// An entry whose details are not a mapping yields a flag with every
    /// field missing.
    pub fn risk_flags(&self) -> Vec<RiskFlag<'_>> {
        let Some(flags) = self.field(RISK_FLAGS).and_then(Value::as_object) else {
            return Vec::new();
        };

        flags
            .iter()
            .map(|(category, details)| {
                let text = move |key: &str| details.get(key).and_then(Value::as_str);
                RiskFlag {
                    category,
                    risk_level: text("risk_level"),
                    explanation: text("explanation"),
                    excerpt: text("exact_clause_excerpt"),
                }
            })
            .collect()
    }

    /// The whole report as JSON with 2-space indentation
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let report = AnalysisReport::from_value(json!({}));
        assert_eq!(*report.key_parties(), json!({}));
        assert_eq!(*report.termination(), json!({}));
        assert_eq!(report.plain_english_summary(), "");
        assert!(report.risk_flags().is_empty());
    }

    #[test]
    fn test_present_sections_are_borrowed_as_is() {
        let report = AnalysisReport::from_value(json!({
            "payment_terms": {"Payment Amount": "$500"},
            "plain_english_summary": "A short deal."
        }));
        assert_eq!(*report.payment_terms(), json!({"Payment Amount": "$500"}));
        assert!(matches!(report.payment_terms(), Cow::Borrowed(_)));
        assert_eq!(report.plain_english_summary(), "A short deal.");
    }

    #[test]
    fn test_mistyped_summary_degrades_to_empty() {
        let report = AnalysisReport::from_value(json!({"plain_english_summary": ["a", "b"]}));
        assert_eq!(report.plain_english_summary(), "");
    }

    #[test]
    fn test_non_object_report_reads_as_empty() {
        let report = AnalysisReport::from_value(json!([1, 2, 3]));
        assert_eq!(*report.key_parties(), json!({}));
        assert!(report.risk_flags().is_empty());
        assert_eq!(report.as_value(), &json!([1, 2, 3]));
    }

    #[test]
    fn test_risk_flags_keep_decoded_order() {
        let raw = r#"{"risk_flags": {
            "Missing Exit Clause Risk": {"risk_level": "Low"},
            "Auto-Renewal Risk": {"risk_level": "High", "explanation": "x"},
            "Liability & Indemnity Risk": {"risk_level": "Medium"}
        }}"#;
        let report = AnalysisReport::from_value(serde_json::from_str(raw).unwrap());
        let categories: Vec<_> = report.risk_flags().iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec!["Missing Exit Clause Risk", "Auto-Renewal Risk", "Liability & Indemnity Risk"]
        );
    }

    #[test]
    fn test_risk_flag_treatments() {
        let report = AnalysisReport::from_value(json!({"risk_flags": {
            "Auto-Renewal Risk": {"risk_level": "High", "explanation": "x"},
            "Other": {"risk_level": "Unknown"},
            "Bare": "not a mapping"
        }}));
        let flags = report.risk_flags();

        assert_eq!(flags[0].treatment(), RiskTreatment::Alert);
        assert_eq!(flags[0].explanation, Some("x"));
        assert_eq!(flags[1].treatment(), RiskTreatment::Success);
        assert_eq!(flags[2].risk_level, None);
        assert_eq!(flags[2].treatment(), RiskTreatment::Success);
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let report = AnalysisReport::from_value(json!({"key_parties": {"Party A": "Acme"}}));
        let pretty = report.to_pretty_json().unwrap();
        assert_eq!(pretty, "{\n  \"key_parties\": {\n    \"Party A\": \"Acme\"\n  }\n}");
    }

    #[test]
    fn test_serializes_transparently() {
        let report = AnalysisReport::from_value(json!({"a": 1}));
        assert_eq!(serde_json::to_value(&report).unwrap(), json!({"a": 1}));
    }
}
