pub mod errors;
pub mod syntax;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::errors::AnalyzeError;

/// Source languages the engine accepts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
}

impl Language {
    /// Parse the language tag from a request, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "python" => Some(Language::Python),
            "javascript" => Some(Language::JavaScript),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["py", "pyi"], Language::Python),
            (&["js", "jsx", "mjs", "cjs"], Language::JavaScript),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, lang)| *lang)
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
        };
        write!(f, "{name}")
    }
}

/// One analysis call's immutable input.
#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: Language,
}

impl AnalysisRequest {
    /// Build a request, rejecting empty fragments before any parse runs.
    pub fn new(code: impl Into<String>, language: Language) -> Result<Self, AnalyzeError> {
        let code = code.into();
        if code.is_empty() {
            return Err(AnalyzeError::request("Code is required"));
        }
        Ok(Self { code, language })
    }
}

/// One contributing construct inside a metric's total.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BreakdownEntry {
    pub kind: String,
    /// 1-based source line.
    pub line: usize,
    pub contribution: f64,
}

/// Raw output of a single metric extractor.
///
/// A result with `error` set carries no trustworthy `value`; the
/// aggregator still consumes the defaulted value so the report as a
/// whole never fails once parsing succeeded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    pub value: f64,
    pub breakdown: Vec<BreakdownEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricResult {
    pub fn of(value: f64) -> Self {
        Self {
            value,
            breakdown: Vec::new(),
            error: None,
        }
    }

    pub fn with_breakdown(value: f64, breakdown: Vec<BreakdownEntry>) -> Self {
        Self {
            value,
            breakdown,
            error: None,
        }
    }

    /// The documented substitute for a failed extraction: value 0 plus
    /// the failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            breakdown: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// The four raw metrics of one analysis call, pre-interpretation.
#[derive(Clone, Debug)]
pub struct MetricSet {
    pub cyclomatic: MetricResult,
    pub cognitive: MetricResult,
    pub weighted: MetricResult,
    pub maintainability: MetricResult,
}

/// A metric value together with its qualitative classification.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InterpretedMetric {
    #[serde(flatten)]
    pub result: MetricResult,
    pub band: String,
    pub band_label: String,
    pub optimal_range: String,
    /// Full band→label table for the metric's scale.
    pub scale: BTreeMap<String, String>,
}

/// Outcome of the external quality linter, attached unweighted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QualityAssessment {
    /// 0–10 score parsed from the linter output, when present.
    pub score: Option<f64>,
    pub report: String,
}

/// Interpreted metrics keyed the way the response serializes them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub cyclomatic_complexity: InterpretedMetric,
    pub cognitive_complexity: InterpretedMetric,
    pub weighted_complexity: InterpretedMetric,
    pub maintainability_index: InterpretedMetric,
}

/// The complete analysis response. Assembled once, never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub language: Language,
    pub overall_score: f64,
    pub metrics: ReportMetrics,
    pub overall_interpretation: String,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityAssessment>,
}

impl AnalysisReport {
    /// Attach (or clear) the supplementary quality assessment.
    pub fn with_quality(mut self, quality: Option<QualityAssessment>) -> Self {
        self.quality = quality;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!(Language::from_name("Python"), Some(Language::Python));
        assert_eq!(Language::from_name("JAVASCRIPT"), Some(Language::JavaScript));
        assert_eq!(Language::from_name("ruby"), None);
    }

    #[test]
    fn empty_request_is_rejected_before_parsing() {
        let err = AnalysisRequest::new("", Language::Python).unwrap_err();
        assert!(matches!(err, AnalyzeError::Request(_)));
    }

    #[test]
    fn failed_metric_defaults_to_zero() {
        let result = MetricResult::failed("boom");
        assert_eq!(result.value, 0.0);
        assert_eq!(result.error.as_deref(), Some("boom"));
    }
}
