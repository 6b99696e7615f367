//! Prompt construction for contract review

use clauselens_domain::ChatMessage;

/// Builds the two-message prompt for one contract
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for the given contract text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the message list: fixed system instructions, then the contract
    pub fn build(self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(self.text),
        ]
    }
}

/// Risk categories the model is asked to assess
pub const RISK_CATEGORIES: [&str; 4] = [
    "Auto-Renewal Risk",
    "Liability & Indemnity Risk",
    "Missing Exit Clause Risk",
    "Intellectual Property Ownership Risk",
];

/// Fixed system instructions
pub const SYSTEM_PROMPT: &str = r#"You are a senior legal contract analyst AI.

Return ONLY valid JSON.
Do not explain reasoning.
If information is missing return "Not Found".

Extract:

1. Key Parties:
- Party A
- Party B
- Additional Parties

2. Contract Overview:
- Contract Type
- Effective Date
- Duration
- Renewal Terms

3. Payment Terms:
- Payment Amount
- Payment Frequency
- Late Fees

4. Termination:
- Termination Conditions
- Notice Period
- Exit Rights

5. Confidentiality Clause:
- Present (Yes/No)
- Summary

6. Risk Flags:
For each:
- risk_level (Low/Medium/High)
- explanation
- exact_clause_excerpt

Categories:
- Auto-Renewal Risk
- Liability & Indemnity Risk
- Missing Exit Clause Risk
- Intellectual Property Ownership Risk

7. Plain English Summary (5-7 sentences)

Return JSON in this structure:
{
  "key_parties": {},
  "contract_overview": {},
  "payment_terms": {},
  "termination": {},
  "confidentiality_clause": {},
  "risk_flags": {},
  "plain_english_summary": ""
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use clauselens_domain::Role;

    #[test]
    fn test_builds_two_messages() {
        let messages = PromptBuilder::new("Sample contract body").build();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Sample contract body");
    }

    #[test]
    fn test_system_prompt_names_schema_keys() {
        for key in [
            "key_parties",
            "contract_overview",
            "payment_terms",
            "termination",
            "confidentiality_clause",
            "risk_flags",
            "plain_english_summary",
        ] {
            assert!(SYSTEM_PROMPT.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_system_prompt_lists_risk_categories() {
        for category in RISK_CATEGORIES {
            assert!(SYSTEM_PROMPT.contains(category));
        }
        assert!(SYSTEM_PROMPT.contains("risk_level (Low/Medium/High)"));
        assert!(SYSTEM_PROMPT.contains("exact_clause_excerpt"));
    }

    #[test]
    fn test_user_content_is_verbatim() {
        let text = "  leading and trailing whitespace \n";
        let messages = PromptBuilder::new(text).build();
        assert_eq!(messages[1].content, text);
    }
}
