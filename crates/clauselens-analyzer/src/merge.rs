//! Merging per-chunk reports into one

use crate::report::{AnalysisReport, MAPPING_SECTIONS, PLAIN_ENGLISH_SUMMARY, RISK_FLAGS};
use clauselens_domain::RiskTreatment;
use serde_json::{Map, Value};

/// Placeholder the model uses for absent information
const NOT_FOUND: &str = "Not Found";

/// Combine chunk reports in document order
///
/// - Mapping sections merge key-wise; the first informative value wins and
///   later chunks only fill keys that are missing, empty or "Not Found".
/// - Risk flags merge by category; a later entry replaces an earlier one
///   only when its treatment is strictly more severe.
/// - Summaries are joined with a blank line.
/// - Any other top-level key keeps its first value.
pub fn merge_reports(reports: &[AnalysisReport]) -> AnalysisReport {
    let mut merged = Map::new();

    for (key, _) in MAPPING_SECTIONS {
        let mut section = Map::new();
        let mut fallback = None;
        for report in reports {
            match report.field(key) {
                Some(Value::Object(entries)) => merge_mapping(&mut section, entries),
                Some(other) if fallback.is_none() => fallback = Some(other.clone()),
                _ => {}
            }
        }
        let value = match fallback {
            Some(other) if section.is_empty() => other,
            _ => Value::Object(section),
        };
        merged.insert(key.to_string(), value);
    }

    merged.insert(RISK_FLAGS.to_string(), Value::Object(merge_risk_flags(reports)));

    let summary = reports
        .iter()
        .map(|r| r.plain_english_summary().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    merged.insert(PLAIN_ENGLISH_SUMMARY.to_string(), Value::String(summary));

    for report in reports {
        if let Some(obj) = report.as_value().as_object() {
            for (key, value) in obj {
                if !merged.contains_key(key) {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
    }

    AnalysisReport::from_value(Value::Object(merged))
}

fn merge_mapping(target: &mut Map<String, Value>, entries: &Map<String, Value>) {
    for (key, value) in entries {
        let replace = match target.get(key) {
            None => true,
            Some(existing) => is_uninformative(existing) && !is_uninformative(value),
        };
        if replace {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn merge_risk_flags(reports: &[AnalysisReport]) -> Map<String, Value> {
    let mut flags: Map<String, Value> = Map::new();

    for report in reports {
        let Some(entries) = report.field(RISK_FLAGS).and_then(Value::as_object) else {
            continue;
        };
        for (category, details) in entries {
            let replace = match flags.get(category) {
                None => true,
                Some(existing) => treatment_of(details) > treatment_of(existing),
            };
            if replace {
                flags.insert(category.clone(), details.clone());
            }
        }
    }

    flags
}

fn treatment_of(details: &Value) -> RiskTreatment {
    RiskTreatment::classify(details.get("risk_level").and_then(Value::as_str))
}

fn is_uninformative(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty() || s.trim() == NOT_FOUND,
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}
