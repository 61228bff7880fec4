//! Maintainability estimate from size, decision density, and comments.
//!
//! `MI = max(0, 171 − 5.2×CC − 0.23×LOC + 0.1×commentPercentage)` where
//! LOC is the non-empty physical line count. Reuses the already-computed
//! decision-point complexity rather than re-parsing. Higher is better.

use crate::core::{Language, MetricResult};

pub fn calculate_maintainability(
    source: &str,
    language: Language,
    cyclomatic: f64,
) -> MetricResult {
    let lines: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let loc = lines.len();
    if loc == 0 {
        return MetricResult::of(0.0);
    }

    let comment_lines = lines
        .iter()
        .filter(|line| is_comment_line(line, language))
        .count();
    let comment_percentage = 100.0 * comment_lines as f64 / loc as f64;

    let value = (171.0 - 5.2 * cyclomatic - 0.23 * loc as f64 + 0.1 * comment_percentage).max(0.0);
    MetricResult::of(value)
}

fn is_comment_line(line: &str, language: Language) -> bool {
    match language {
        Language::Python => line.starts_with('#'),
        Language::JavaScript => {
            line.starts_with("//")
                || line.starts_with("/*")
                || line.starts_with('*')
                || line.ends_with("*/")
        }
    }
}
