//! Cognitive complexity: decision points weighted by nesting depth.
//!
//! Each conditional, loop, or exception handler costs `1 + nesting` and
//! deepens nesting for its own subtree only; depth is restored on exit,
//! so siblings never inherit it. Boolean chains and comparison chains
//! add flat contributions with no nesting multiplier, mirroring the
//! decision-point treatment rather than the structural one.

use crate::core::syntax::{NodeKind, SourceModel, StructuralNode};
use crate::core::{BreakdownEntry, MetricResult};

/// Tokens that open a nesting-increasing construct on the heuristic path.
const NESTING_TOKENS: &[&str] = &[
    "if ", "if(", "else ", "else{", "for ", "for(", "while ", "while(", "catch ", "catch(",
];

pub fn calculate_cognitive(model: &SourceModel) -> MetricResult {
    match model {
        SourceModel::Tree(root) => from_tree(root),
        SourceModel::Text(source) => from_text(source),
    }
}

fn from_tree(root: &StructuralNode) -> MetricResult {
    let mut breakdown = Vec::new();
    let value = children_score(root, 0, &mut breakdown);
    MetricResult::with_breakdown(value, breakdown)
}

fn children_score(node: &StructuralNode, nesting: u32, breakdown: &mut Vec<BreakdownEntry>) -> f64 {
    node.children
        .iter()
        .map(|child| node_score(child, nesting, breakdown))
        .sum()
}

fn node_score(node: &StructuralNode, nesting: u32, breakdown: &mut Vec<BreakdownEntry>) -> f64 {
    match node.kind {
        NodeKind::Conditional | NodeKind::Loop | NodeKind::ExceptionHandler => {
            let contribution = f64::from(1 + nesting);
            breakdown.push(BreakdownEntry {
                kind: node.kind.name().to_string(),
                line: node.line,
                contribution,
            });
            contribution + children_score(node, nesting + 1, breakdown)
        }
        NodeKind::LogicalCombinator { operands } => {
            flat_score(node, operands, nesting, breakdown)
        }
        NodeKind::Comparison { operators } => flat_score(node, operators, nesting, breakdown),
        NodeKind::FunctionDef | NodeKind::ClassDef | NodeKind::Block => {
            children_score(node, nesting, breakdown)
        }
    }
}

fn flat_score(
    node: &StructuralNode,
    chain_len: usize,
    nesting: u32,
    breakdown: &mut Vec<BreakdownEntry>,
) -> f64 {
    let contribution = chain_len.saturating_sub(1) as f64;
    if contribution > 0.0 {
        breakdown.push(BreakdownEntry {
            kind: node.kind.name().to_string(),
            line: node.line,
            contribution,
        });
    }
    contribution + children_score(node, nesting, breakdown)
}

fn from_text(source: &str) -> MetricResult {
    let mut breakdown = Vec::new();
    let mut value = 0.0;
    let mut nesting: u32 = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("/*")
            || line.starts_with('*')
        {
            continue;
        }

        if NESTING_TOKENS.iter().any(|token| line.contains(token)) {
            let contribution = f64::from(1 + nesting);
            breakdown.push(BreakdownEntry {
                kind: "control flow".to_string(),
                line: idx + 1,
                contribution,
            });
            value += contribution;
            nesting += 1;
        }

        if line.contains("&&") || line.contains("||") || line.contains('?') {
            breakdown.push(BreakdownEntry {
                kind: "logical operator".to_string(),
                line: idx + 1,
                contribution: 1.0,
            });
            value += 1.0;
        }

        if line.contains("case ") || line.contains("default:") {
            breakdown.push(BreakdownEntry {
                kind: "switch case".to_string(),
                line: idx + 1,
                contribution: 1.0,
            });
            value += 1.0;
        }

        let closes = line.matches('}').count() as u32;
        if closes > 0 {
            nesting = nesting.saturating_sub(closes);
        }
    }

    MetricResult::with_breakdown(value, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::StructuralNode;

    fn conditional(line: usize, children: Vec<StructuralNode>) -> StructuralNode {
        StructuralNode::with_children(NodeKind::Conditional, line, children)
    }

    fn block(children: Vec<StructuralNode>) -> StructuralNode {
        StructuralNode::with_children(NodeKind::Block, 1, children)
    }

    #[test]
    fn flat_tree_scores_zero() {
        let result = calculate_cognitive(&SourceModel::Tree(block(vec![])));
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn nested_conditionals_accumulate_depth() {
        // outer if at depth 0 (+1), inner if at depth 1 (+2)
        let tree = block(vec![conditional(1, vec![conditional(2, vec![])])]);
        let result = calculate_cognitive(&SourceModel::Tree(tree));
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn siblings_do_not_inherit_nesting() {
        let tree = block(vec![conditional(1, vec![]), conditional(3, vec![])]);
        let result = calculate_cognitive(&SourceModel::Tree(tree));
        assert_eq!(result.value, 2.0);
    }

    #[test]
    fn combinators_score_flat_under_nesting() {
        // `if` (+1) containing a 3-operand boolean chain (flat +2)
        let tree = block(vec![conditional(
            1,
            vec![StructuralNode::new(
                NodeKind::LogicalCombinator { operands: 3 },
                1,
            )],
        )]);
        let result = calculate_cognitive(&SourceModel::Tree(tree));
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn text_scan_tracks_braces_for_nesting() {
        let source = "if (a) {\n  if (b) {\n    f();\n  }\n}\nif (c) {\n}\n";
        let result = calculate_cognitive(&SourceModel::Text(source.to_string()));
        // 1 for outer, 2 for inner, then braces close back to zero: 1 again
        assert_eq!(result.value, 4.0);
    }
}
