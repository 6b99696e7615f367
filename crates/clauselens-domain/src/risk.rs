//! Risk module - visual treatment buckets for risk flags

/// Visual treatment of a risk flag
///
/// The classification is three-way, keyed on the exact `risk_level` string:
/// - `"High"` renders as an alert
/// - `"Medium"` renders as a warning
/// - anything else, including `"Low"`, a missing level or an unrecognized
///   value, renders as success
///
/// Note that `"Low"` and unknown levels share a bucket, so a model that
/// answers `"Critical"` is shown as benign. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskTreatment {
    /// Low, missing or unrecognized level
    Success,

    /// `"Medium"`
    Warning,

    /// `"High"`
    Alert,
}

impl RiskTreatment {
    /// Level assumed when a flag carries no `risk_level`
    pub const DEFAULT_LEVEL: &'static str = "Low";

    /// Classify a risk level string
    pub fn classify(level: Option<&str>) -> Self {
        match level.unwrap_or(Self::DEFAULT_LEVEL) {
            "High" => RiskTreatment::Alert,
            "Medium" => RiskTreatment::Warning,
            _ => RiskTreatment::Success,
        }
    }

    /// CSS-style class name for the treatment
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTreatment::Alert => "alert",
            RiskTreatment::Warning => "warning",
            RiskTreatment::Success => "success",
        }
    }
}
