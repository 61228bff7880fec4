//! Report assembly: raw metrics in, one immutable response out.

use crate::core::{AnalysisReport, Language, MetricSet, QualityAssessment, ReportMetrics};
use crate::{interpret, scoring};

/// Compose the final report from the extracted metrics.
///
/// The quality assessment is supplementary and unweighted; pass `None`
/// when the collaborator was skipped or unavailable.
pub fn assemble(
    language: Language,
    metrics: MetricSet,
    quality: Option<QualityAssessment>,
) -> AnalysisReport {
    let overall_score = scoring::score_metrics(&metrics);
    let recommendations = interpret::recommendations(&metrics);
    let overall_interpretation = interpret::overall_interpretation(overall_score);

    let MetricSet {
        cyclomatic,
        cognitive,
        weighted,
        maintainability,
    } = metrics;

    AnalysisReport {
        language,
        overall_score,
        metrics: ReportMetrics {
            cyclomatic_complexity: interpret::interpret_cyclomatic(cyclomatic),
            cognitive_complexity: interpret::interpret_cognitive(cognitive),
            weighted_complexity: interpret::interpret_weighted(weighted),
            maintainability_index: interpret::interpret_maintainability(maintainability),
        },
        overall_interpretation,
        recommendations,
        quality,
    }
}
