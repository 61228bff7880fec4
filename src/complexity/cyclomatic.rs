//! Decision-point (cyclomatic) complexity.
//!
//! Classic formula: one base path plus one per decision point. Boolean
//! chains and chained comparisons contribute one per extra operand or
//! operator, matching how each short-circuit or comparison adds an
//! independent path.

use crate::core::syntax::{NodeKind, SourceModel, StructuralNode};
use crate::core::{BreakdownEntry, MetricResult};

/// Tokens the heuristic path counts as decision points, per line.
pub(crate) const BRANCH_TOKENS: &[&str] = &[
    "if ", "if(", "else ", "else{", "case ", "default:", "?", "&&", "||", "for ", "for(",
    "while ", "while(", "catch ", "catch(",
];

pub fn calculate_cyclomatic(model: &SourceModel) -> MetricResult {
    match model {
        SourceModel::Tree(root) => from_tree(root),
        SourceModel::Text(source) => from_text(source),
    }
}

fn from_tree(root: &StructuralNode) -> MetricResult {
    let mut breakdown = Vec::new();
    root.walk(&mut |node| {
        if let Some(contribution) = branch_contribution(&node.kind) {
            breakdown.push(BreakdownEntry {
                kind: node.kind.name().to_string(),
                line: node.line,
                contribution,
            });
        }
    });

    let value = 1.0 + breakdown.iter().map(|e| e.contribution).sum::<f64>();
    MetricResult::with_breakdown(value, breakdown)
}

/// Contribution of one node to the path count, if it is a decision point.
pub(crate) fn branch_contribution(kind: &NodeKind) -> Option<f64> {
    match kind {
        NodeKind::Conditional | NodeKind::Loop | NodeKind::ExceptionHandler => Some(1.0),
        NodeKind::LogicalCombinator { operands } => {
            let extra = operands.saturating_sub(1);
            (extra > 0).then_some(extra as f64)
        }
        NodeKind::Comparison { operators } => {
            let extra = operators.saturating_sub(1);
            (extra > 0).then_some(extra as f64)
        }
        _ => None,
    }
}

fn from_text(source: &str) -> MetricResult {
    let mut breakdown = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        for token in BRANCH_TOKENS {
            let count = line.matches(token).count();
            if count > 0 {
                breakdown.push(BreakdownEntry {
                    kind: format!("token `{}`", token.trim_end()),
                    line: idx + 1,
                    contribution: count as f64,
                });
            }
        }
    }

    let value = 1.0 + breakdown.iter().map(|e| e.contribution).sum::<f64>();
    MetricResult::with_breakdown(value, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::StructuralNode;

    #[test]
    fn empty_tree_scores_base_path() {
        let model = SourceModel::Tree(StructuralNode::new(NodeKind::Block, 1));
        let result = calculate_cyclomatic(&model);
        assert_eq!(result.value, 1.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn empty_text_scores_base_path() {
        let result = calculate_cyclomatic(&SourceModel::Text(String::new()));
        assert_eq!(result.value, 1.0);
    }

    #[test]
    fn single_operand_chains_contribute_nothing() {
        assert_eq!(
            branch_contribution(&NodeKind::LogicalCombinator { operands: 1 }),
            None
        );
        assert_eq!(
            branch_contribution(&NodeKind::Comparison { operators: 1 }),
            None
        );
    }

    #[test]
    fn text_scan_counts_branch_tokens_per_line() {
        let source = "if (a) {\n  return b ? 1 : 2;\n}\n";
        let result = calculate_cyclomatic(&SourceModel::Text(source.to_string()));
        // `if ` on line 1, `?` on line 2
        assert_eq!(result.value, 3.0);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].line, 1);
        assert_eq!(result.breakdown[1].line, 2);
    }
}
