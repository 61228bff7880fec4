pub mod cognitive;
pub mod cyclomatic;
pub mod maintainability;
pub mod weighted;

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::core::syntax::SourceModel;
use crate::core::{Language, MetricResult, MetricSet};

/// Run every extractor over one source model.
///
/// Extractors are pure and independent; a failure in one is isolated and
/// substituted with the documented default so the report is still
/// assembled. The maintainability estimate consumes the decision-point
/// value rather than re-deriving it, falling back to 1 when that
/// extraction failed.
pub fn extract_all(model: &SourceModel, source: &str, language: Language) -> MetricSet {
    let cyclomatic = guarded("cyclomatic", || cyclomatic::calculate_cyclomatic(model));
    let cognitive = guarded("cognitive", || cognitive::calculate_cognitive(model));
    let weighted = guarded("weighted", || weighted::calculate_weighted(model));

    let effective_cc = if cyclomatic.error.is_some() {
        1.0
    } else {
        cyclomatic.value
    };
    let maintainability = guarded("maintainability", || {
        maintainability::calculate_maintainability(source, language, effective_cc)
    });

    MetricSet {
        cyclomatic,
        cognitive,
        weighted,
        maintainability,
    }
}

fn guarded(name: &str, extract: impl FnOnce() -> MetricResult) -> MetricResult {
    match catch_unwind(AssertUnwindSafe(extract)) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(metric = name, "metric extraction failed; substituting default");
            MetricResult::failed(format!("{name} extraction failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::{NodeKind, StructuralNode};

    #[test]
    fn all_metrics_are_computed_for_an_empty_fragment() {
        let model = SourceModel::Tree(StructuralNode::new(NodeKind::Block, 1));
        let set = extract_all(&model, "", Language::Python);
        assert_eq!(set.cyclomatic.value, 1.0);
        assert_eq!(set.cognitive.value, 0.0);
        assert_eq!(set.weighted.value, 1.0);
        assert_eq!(set.maintainability.value, 0.0);
        assert!(set.cyclomatic.error.is_none());
    }
}
