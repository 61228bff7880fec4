//! State-free interpretation of raw metric values.
//!
//! Each metric has a fixed scale: ordered bands with thresholds that
//! never change at runtime. Classification is a table lookup; the
//! recommendation rules fire independently and are reported in metric
//! order (decision points, then cognitive load, then maintainability).

use std::collections::BTreeMap;

use crate::core::{InterpretedMetric, MetricResult, MetricSet};

#[derive(Clone, Copy, Debug)]
pub struct Band {
    pub key: &'static str,
    pub label: &'static str,
}

/// How a scale's thresholds partition values into bands.
#[derive(Clone, Copy, Debug)]
enum Cut {
    /// Band `i` holds values `<=` threshold `i` (lower is better).
    UpperInclusive,
    /// Band `i` holds values `>=` threshold `i` (higher is better).
    LowerInclusive,
    /// Band `i` holds values `<` threshold `i` (lower is better).
    UpperExclusive,
}

pub struct Scale {
    pub optimal_range: &'static str,
    thresholds: &'static [f64],
    pub bands: &'static [Band],
    cut: Cut,
}

impl Scale {
    pub fn classify(&self, value: f64) -> &'static Band {
        let index = self
            .thresholds
            .iter()
            .position(|&threshold| match self.cut {
                Cut::UpperInclusive => value <= threshold,
                Cut::LowerInclusive => value >= threshold,
                Cut::UpperExclusive => value < threshold,
            })
            .unwrap_or(self.bands.len() - 1);
        &self.bands[index]
    }

    pub fn table(&self) -> BTreeMap<String, String> {
        self.bands
            .iter()
            .map(|band| (band.key.to_string(), band.label.to_string()))
            .collect()
    }

    fn apply(&self, result: MetricResult) -> InterpretedMetric {
        let band = self.classify(result.value);
        InterpretedMetric {
            result,
            band: band.key.to_string(),
            band_label: band.label.to_string(),
            optimal_range: self.optimal_range.to_string(),
            scale: self.table(),
        }
    }
}

pub static CYCLOMATIC_SCALE: Scale = Scale {
    optimal_range: "1-5",
    thresholds: &[5.0, 10.0, 20.0],
    bands: &[
        Band {
            key: "simple",
            label: "simple",
        },
        Band {
            key: "moderate",
            label: "moderate",
        },
        Band {
            key: "complex",
            label: "complex, refactor recommended",
        },
        Band {
            key: "critical",
            label: "critical",
        },
    ],
    cut: Cut::UpperInclusive,
};

pub static COGNITIVE_SCALE: Scale = Scale {
    optimal_range: "0-5",
    thresholds: &[5.0, 10.0, 15.0],
    bands: &[
        Band {
            key: "very_easy",
            label: "very easy to understand",
        },
        Band {
            key: "moderate",
            label: "moderately easy to understand",
        },
        Band {
            key: "difficult",
            label: "difficult to understand",
        },
        Band {
            key: "very_difficult",
            label: "very difficult to understand",
        },
    ],
    cut: Cut::UpperInclusive,
};

pub static WEIGHTED_SCALE: Scale = Scale {
    optimal_range: "1-7",
    thresholds: &[7.0, 15.0, 25.0],
    bands: &[
        Band {
            key: "well_structured",
            label: "well-structured",
        },
        Band {
            key: "moderate",
            label: "moderate",
        },
        Band {
            key: "high",
            label: "high: review nesting",
        },
        Band {
            key: "very_high",
            label: "very high: restructure",
        },
    ],
    cut: Cut::UpperInclusive,
};

pub static MAINTAINABILITY_SCALE: Scale = Scale {
    optimal_range: "85-100",
    thresholds: &[85.0, 65.0, 50.0],
    bands: &[
        Band {
            key: "excellent",
            label: "excellent maintainability",
        },
        Band {
            key: "good",
            label: "good maintainability",
        },
        Band {
            key: "moderate",
            label: "moderate maintainability",
        },
        Band {
            key: "low",
            label: "low maintainability",
        },
    ],
    cut: Cut::LowerInclusive,
};

pub static OVERALL_SCALE: Scale = Scale {
    optimal_range: "0-19",
    thresholds: &[20.0, 40.0, 60.0, 80.0],
    bands: &[
        Band {
            key: "excellent",
            label: "excellent: very low structural complexity",
        },
        Band {
            key: "good",
            label: "good: low structural complexity",
        },
        Band {
            key: "moderate",
            label: "moderate: some refactoring would help readability",
        },
        Band {
            key: "complex",
            label: "complex: refactoring recommended",
        },
        Band {
            key: "very_complex",
            label: "very complex: significant refactoring recommended",
        },
    ],
    cut: Cut::UpperExclusive,
};

pub fn interpret_cyclomatic(result: MetricResult) -> InterpretedMetric {
    CYCLOMATIC_SCALE.apply(result)
}

pub fn interpret_cognitive(result: MetricResult) -> InterpretedMetric {
    COGNITIVE_SCALE.apply(result)
}

pub fn interpret_weighted(result: MetricResult) -> InterpretedMetric {
    WEIGHTED_SCALE.apply(result)
}

pub fn interpret_maintainability(result: MetricResult) -> InterpretedMetric {
    MAINTAINABILITY_SCALE.apply(result)
}

/// One-sentence interpretation of the aggregate score.
pub fn overall_interpretation(score: f64) -> String {
    let band = OVERALL_SCALE.classify(score);
    format!("Overall complexity is {}", band.label)
}

/// Refactoring guidance. Rules fire independently; when none match, a
/// single positive acknowledgment is returned instead of an empty list.
pub fn recommendations(metrics: &MetricSet) -> Vec<String> {
    let mut recs = Vec::new();
    if metrics.cyclomatic.value > 10.0 {
        recs.push(
            "High decision-point complexity: break large functions into smaller, \
             single-purpose functions."
                .to_string(),
        );
    }
    if metrics.cognitive.value > 15.0 {
        recs.push(
            "High cognitive complexity: reduce nesting depth with early returns or by \
             extracting nested logic."
                .to_string(),
        );
    }
    if metrics.maintainability.value < 65.0 {
        recs.push(
            "Low maintainability estimate: add explanatory comments and improve naming \
             consistency."
                .to_string(),
        );
    }
    if recs.is_empty() {
        recs.push("Complexity is within healthy ranges; no refactoring needed.".to_string());
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclomatic_boundaries() {
        assert_eq!(CYCLOMATIC_SCALE.classify(5.0).key, "simple");
        assert_eq!(CYCLOMATIC_SCALE.classify(6.0).key, "moderate");
        assert_eq!(CYCLOMATIC_SCALE.classify(10.0).key, "moderate");
        assert_eq!(CYCLOMATIC_SCALE.classify(11.0).key, "complex");
        assert_eq!(CYCLOMATIC_SCALE.classify(20.0).key, "complex");
        assert_eq!(CYCLOMATIC_SCALE.classify(21.0).key, "critical");
    }

    #[test]
    fn maintainability_is_higher_is_better() {
        assert_eq!(MAINTAINABILITY_SCALE.classify(85.0).key, "excellent");
        assert_eq!(MAINTAINABILITY_SCALE.classify(84.9).key, "good");
        assert_eq!(MAINTAINABILITY_SCALE.classify(65.0).key, "good");
        assert_eq!(MAINTAINABILITY_SCALE.classify(50.0).key, "moderate");
        assert_eq!(MAINTAINABILITY_SCALE.classify(49.9).key, "low");
    }

    #[test]
    fn overall_boundaries_are_exclusive() {
        assert_eq!(OVERALL_SCALE.classify(19.99).key, "excellent");
        assert_eq!(OVERALL_SCALE.classify(20.0).key, "good");
        assert_eq!(OVERALL_SCALE.classify(79.99).key, "complex");
        assert_eq!(OVERALL_SCALE.classify(80.0).key, "very_complex");
    }
}
