//! Uniform structural model shared by every metric extractor.
//!
//! The native-grammar analyzers lower their language AST into a
//! `SourceModel::Tree`, a finite acyclic single-owner tree of
//! `StructuralNode`s in deterministic pre-order. The heuristic analyzers
//! keep the raw source as `SourceModel::Text` and scan it line by line.

/// The structural role of a single node, as consumed by the metric
/// extractors. Carries the operand/operator counts needed for the
/// boolean- and comparison-chain contributions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Conditional,
    Loop,
    ExceptionHandler,
    LogicalCombinator { operands: usize },
    Comparison { operators: usize },
    FunctionDef,
    ClassDef,
    Block,
}

impl NodeKind {
    /// Stable label used for breakdown entries.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Conditional => "conditional",
            NodeKind::Loop => "loop",
            NodeKind::ExceptionHandler => "exception_handler",
            NodeKind::LogicalCombinator { .. } => "logical_combinator",
            NodeKind::Comparison { .. } => "comparison",
            NodeKind::FunctionDef => "function",
            NodeKind::ClassDef => "class",
            NodeKind::Block => "block",
        }
    }
}

/// One node of the uniform structural tree.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuralNode {
    pub kind: NodeKind,
    /// 1-based source line where the construct begins.
    pub line: usize,
    pub children: Vec<StructuralNode>,
}

impl StructuralNode {
    /// A leaf node with no children yet.
    pub fn new(kind: NodeKind, line: usize) -> Self {
        Self {
            kind,
            line,
            children: Vec::new(),
        }
    }

    /// A node pre-populated with its children.
    pub fn with_children(kind: NodeKind, line: usize, children: Vec<StructuralNode>) -> Self {
        Self {
            kind,
            line,
            children,
        }
    }

    /// Visit this node and every descendant in pre-order.
    pub fn walk<F: FnMut(&StructuralNode)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

/// The two shapes of analysis input a metric extractor must handle.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceModel {
    /// Native-grammar path: a fully structured tree.
    Tree(StructuralNode),
    /// Heuristic path: the raw source text.
    Text(String),
}
