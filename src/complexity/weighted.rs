//! Nesting-weighted complexity: per-function decision complexity scaled
//! by how deeply the function is defined.
//!
//! Each function subtree scores `1 + decision contributions`, multiplied
//! by `1 + 0.1 × definition depth`, where depth counts enclosing
//! function and class definitions. The totals are summed across every
//! function in the fragment; a fragment with no functions counts as one
//! implicit unit.

use crate::complexity::cyclomatic;
use crate::core::syntax::{NodeKind, SourceModel, StructuralNode};
use crate::core::{BreakdownEntry, MetricResult};

pub fn calculate_weighted(model: &SourceModel) -> MetricResult {
    match model {
        SourceModel::Tree(root) => from_tree(root),
        SourceModel::Text(source) => from_text(source),
    }
}

fn from_tree(root: &StructuralNode) -> MetricResult {
    let mut breakdown = Vec::new();
    collect_functions(root, 0, &mut breakdown);

    if breakdown.is_empty() {
        // Whole fragment as a single implicit unit.
        return MetricResult::of(1.0);
    }

    let value = breakdown.iter().map(|e| e.contribution).sum::<f64>();
    MetricResult::with_breakdown(value, breakdown)
}

fn collect_functions(node: &StructuralNode, depth: u32, breakdown: &mut Vec<BreakdownEntry>) {
    for child in &node.children {
        match child.kind {
            NodeKind::FunctionDef => {
                let base = 1.0 + subtree_decision_score(child);
                let weight = 1.0 + 0.1 * f64::from(depth);
                breakdown.push(BreakdownEntry {
                    kind: "function".to_string(),
                    line: child.line,
                    contribution: base * weight,
                });
                collect_functions(child, depth + 1, breakdown);
            }
            NodeKind::ClassDef => collect_functions(child, depth + 1, breakdown),
            _ => collect_functions(child, depth, breakdown),
        }
    }
}

/// Decision contributions of all descendants: conditionals and loops
/// count one each, chains count their extra operands or operators.
/// Exception handlers are excluded here, unlike the path count.
fn subtree_decision_score(node: &StructuralNode) -> f64 {
    let mut score = 0.0;
    node.walk(&mut |descendant| {
        score += match descendant.kind {
            NodeKind::Conditional | NodeKind::Loop => 1.0,
            NodeKind::LogicalCombinator { operands } => operands.saturating_sub(1) as f64,
            NodeKind::Comparison { operators } => operators.saturating_sub(1) as f64,
            _ => 0.0,
        };
    });
    score
}

fn from_text(source: &str) -> MetricResult {
    let base = cyclomatic::calculate_cyclomatic(&SourceModel::Text(source.to_string())).value;

    // Brace tracking approximates definition depth; comments are skipped
    // so a `{` in commented-out code cannot inflate the weight.
    let mut nesting: i32 = 0;
    let mut max_nesting: i32 = 0;
    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("/*")
            || line.starts_with('*')
        {
            continue;
        }
        nesting += raw.matches('{').count() as i32;
        nesting -= raw.matches('}').count() as i32;
        max_nesting = max_nesting.max(nesting);
    }

    let weight = 1.0 + 0.1 * f64::from(max_nesting.max(0) as u32);
    let value = base * weight;
    MetricResult::with_breakdown(
        value,
        vec![BreakdownEntry {
            kind: "fragment".to_string(),
            line: 1,
            contribution: value,
        }],
    )
}
