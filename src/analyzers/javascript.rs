//! Heuristic adapter for JavaScript fragments.
//!
//! No full structural lowering exists for this grammar; the adapter
//! validates syntax with tree-sitter and hands the raw text to the
//! extractors' line/token scans. Precision is lower than the native
//! path (nested scope is not resolved exactly), but simple inputs land
//! in the same numeric ranges.

use anyhow::anyhow;
use tree_sitter::{Node, Parser};

use crate::analyzers::SyntaxAdapter;
use crate::core::errors::{AnalyzeError, Result};
use crate::core::syntax::SourceModel;
use crate::core::Language;

pub struct JavaScriptAdapter;

impl JavaScriptAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxAdapter for JavaScriptAdapter {
    fn parse(&self, source: &str) -> Result<SourceModel> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| AnalyzeError::Internal(anyhow!("failed to load JavaScript grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalyzeError::Internal(anyhow!("JavaScript parser produced no tree")))?;

        let root = tree.root_node();
        if root.has_error() {
            let detail = find_error_node(root)
                .map(|node| {
                    let position = node.start_position();
                    format!(
                        "unexpected token at line {}, column {}",
                        position.row + 1,
                        position.column + 1
                    )
                })
                .unwrap_or_else(|| "invalid syntax".to_string());
            return Err(AnalyzeError::syntax(format!(
                "JavaScript syntax error: {detail}"
            )));
        }

        Ok(SourceModel::Text(source.to_string()))
    }

    fn language(&self) -> Language {
        Language::JavaScript
    }
}

/// First error or missing node in document order, if any.
fn find_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error_node(child) {
            return Some(found);
        }
    }
    None
}
