//! Native-grammar adapter for Python fragments.
//!
//! Parses with rustpython and lowers the AST into the structural tree.
//! Every construct that affects control flow is represented; the rest of
//! the AST is walked transparently so combinators and comparisons nested
//! in arbitrary expression positions still surface.

use rustpython_parser::{ast, parse, Mode};

use crate::analyzers::SyntaxAdapter;
use crate::core::errors::{AnalyzeError, Result};
use crate::core::syntax::{NodeKind, SourceModel, StructuralNode};
use crate::core::Language;

pub struct PythonAdapter;

impl PythonAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxAdapter for PythonAdapter {
    fn parse(&self, source: &str) -> Result<SourceModel> {
        let module = parse(source, Mode::Module, "<fragment>")
            .map_err(|e| AnalyzeError::syntax(e.to_string()))?;
        let index = LineIndex::new(source);
        Ok(SourceModel::Tree(lower_module(&module, &index)))
    }

    fn language(&self) -> Language {
        Language::Python
    }
}

/// Maps byte offsets from the parser's ranges to 1-based line numbers.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

fn lower_module(module: &ast::Mod, index: &LineIndex) -> StructuralNode {
    let mut root = StructuralNode::new(NodeKind::Block, 1);
    if let ast::Mod::Module(m) = module {
        lower_stmts(&m.body, index, &mut root.children);
    }
    root
}

fn lower_stmts(stmts: &[ast::Stmt], index: &LineIndex, out: &mut Vec<StructuralNode>) {
    for stmt in stmts {
        lower_stmt(stmt, index, out);
    }
}

fn lower_stmt(stmt: &ast::Stmt, index: &LineIndex, out: &mut Vec<StructuralNode>) {
    match stmt {
        ast::Stmt::If(if_stmt) => {
            let mut node = StructuralNode::new(
                NodeKind::Conditional,
                index.line_of(if_stmt.range.start().to_usize()),
            );
            lower_expr(&if_stmt.test, index, &mut node.children);
            lower_stmts(&if_stmt.body, index, &mut node.children);
            lower_stmts(&if_stmt.orelse, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::While(while_stmt) => {
            let mut node = StructuralNode::new(
                NodeKind::Loop,
                index.line_of(while_stmt.range.start().to_usize()),
            );
            lower_expr(&while_stmt.test, index, &mut node.children);
            lower_stmts(&while_stmt.body, index, &mut node.children);
            lower_stmts(&while_stmt.orelse, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::For(for_stmt) => {
            let mut node = StructuralNode::new(
                NodeKind::Loop,
                index.line_of(for_stmt.range.start().to_usize()),
            );
            lower_expr(&for_stmt.iter, index, &mut node.children);
            lower_stmts(&for_stmt.body, index, &mut node.children);
            lower_stmts(&for_stmt.orelse, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::AsyncFor(for_stmt) => {
            let mut node = StructuralNode::new(
                NodeKind::Loop,
                index.line_of(for_stmt.range.start().to_usize()),
            );
            lower_expr(&for_stmt.iter, index, &mut node.children);
            lower_stmts(&for_stmt.body, index, &mut node.children);
            lower_stmts(&for_stmt.orelse, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::Try(try_stmt) => {
            lower_stmts(&try_stmt.body, index, out);
            for handler in &try_stmt.handlers {
                lower_handler(handler, index, out);
            }
            lower_stmts(&try_stmt.orelse, index, out);
            lower_stmts(&try_stmt.finalbody, index, out);
        }
        ast::Stmt::TryStar(try_stmt) => {
            lower_stmts(&try_stmt.body, index, out);
            for handler in &try_stmt.handlers {
                lower_handler(handler, index, out);
            }
            lower_stmts(&try_stmt.orelse, index, out);
            lower_stmts(&try_stmt.finalbody, index, out);
        }
        ast::Stmt::FunctionDef(func_def) => {
            let mut node = StructuralNode::new(
                NodeKind::FunctionDef,
                index.line_of(func_def.range.start().to_usize()),
            );
            for decorator in &func_def.decorator_list {
                lower_expr(decorator, index, &mut node.children);
            }
            lower_stmts(&func_def.body, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::AsyncFunctionDef(func_def) => {
            let mut node = StructuralNode::new(
                NodeKind::FunctionDef,
                index.line_of(func_def.range.start().to_usize()),
            );
            for decorator in &func_def.decorator_list {
                lower_expr(decorator, index, &mut node.children);
            }
            lower_stmts(&func_def.body, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::ClassDef(class_def) => {
            let mut node = StructuralNode::new(
                NodeKind::ClassDef,
                index.line_of(class_def.range.start().to_usize()),
            );
            for decorator in &class_def.decorator_list {
                lower_expr(decorator, index, &mut node.children);
            }
            for base in &class_def.bases {
                lower_expr(base, index, &mut node.children);
            }
            lower_stmts(&class_def.body, index, &mut node.children);
            out.push(node);
        }
        ast::Stmt::With(with_stmt) => {
            for item in &with_stmt.items {
                lower_expr(&item.context_expr, index, out);
            }
            lower_stmts(&with_stmt.body, index, out);
        }
        ast::Stmt::AsyncWith(with_stmt) => {
            for item in &with_stmt.items {
                lower_expr(&item.context_expr, index, out);
            }
            lower_stmts(&with_stmt.body, index, out);
        }
        ast::Stmt::Match(match_stmt) => {
            lower_expr(&match_stmt.subject, index, out);
            for case in &match_stmt.cases {
                if let Some(guard) = &case.guard {
                    lower_expr(guard, index, out);
                }
                lower_stmts(&case.body, index, out);
            }
        }
        ast::Stmt::Return(return_stmt) => {
            if let Some(value) = &return_stmt.value {
                lower_expr(value, index, out);
            }
        }
        ast::Stmt::Expr(expr_stmt) => {
            lower_expr(&expr_stmt.value, index, out);
        }
        ast::Stmt::Assign(assign) => {
            lower_expr(&assign.value, index, out);
        }
        ast::Stmt::AugAssign(assign) => {
            lower_expr(&assign.value, index, out);
        }
        ast::Stmt::AnnAssign(assign) => {
            if let Some(value) = &assign.value {
                lower_expr(value, index, out);
            }
        }
        ast::Stmt::Assert(assert_stmt) => {
            lower_expr(&assert_stmt.test, index, out);
            if let Some(msg) = &assert_stmt.msg {
                lower_expr(msg, index, out);
            }
        }
        ast::Stmt::Raise(raise_stmt) => {
            if let Some(exc) = &raise_stmt.exc {
                lower_expr(exc, index, out);
            }
            if let Some(cause) = &raise_stmt.cause {
                lower_expr(cause, index, out);
            }
        }
        ast::Stmt::Delete(delete_stmt) => {
            for target in &delete_stmt.targets {
                lower_expr(target, index, out);
            }
        }
        _ => {}
    }
}

fn lower_handler(handler: &ast::ExceptHandler, index: &LineIndex, out: &mut Vec<StructuralNode>) {
    let ast::ExceptHandler::ExceptHandler(h) = handler;
    let mut node = StructuralNode::new(
        NodeKind::ExceptionHandler,
        index.line_of(h.range.start().to_usize()),
    );
    lower_stmts(&h.body, index, &mut node.children);
    out.push(node);
}

fn lower_expr(expr: &ast::Expr, index: &LineIndex, out: &mut Vec<StructuralNode>) {
    match expr {
        ast::Expr::BoolOp(bool_op) => {
            let mut node = StructuralNode::new(
                NodeKind::LogicalCombinator {
                    operands: bool_op.values.len(),
                },
                index.line_of(bool_op.range.start().to_usize()),
            );
            for value in &bool_op.values {
                lower_expr(value, index, &mut node.children);
            }
            out.push(node);
        }
        ast::Expr::Compare(compare) => {
            let mut node = StructuralNode::new(
                NodeKind::Comparison {
                    operators: compare.ops.len(),
                },
                index.line_of(compare.range.start().to_usize()),
            );
            lower_expr(&compare.left, index, &mut node.children);
            for comparator in &compare.comparators {
                lower_expr(comparator, index, &mut node.children);
            }
            out.push(node);
        }
        ast::Expr::NamedExpr(named) => {
            lower_expr(&named.value, index, out);
        }
        ast::Expr::BinOp(bin_op) => {
            lower_expr(&bin_op.left, index, out);
            lower_expr(&bin_op.right, index, out);
        }
        ast::Expr::UnaryOp(unary_op) => {
            lower_expr(&unary_op.operand, index, out);
        }
        ast::Expr::Lambda(lambda) => {
            lower_expr(&lambda.body, index, out);
        }
        ast::Expr::IfExp(if_exp) => {
            lower_expr(&if_exp.test, index, out);
            lower_expr(&if_exp.body, index, out);
            lower_expr(&if_exp.orelse, index, out);
        }
        ast::Expr::Dict(dict) => {
            for key in dict.keys.iter().flatten() {
                lower_expr(key, index, out);
            }
            for value in &dict.values {
                lower_expr(value, index, out);
            }
        }
        ast::Expr::Set(set) => {
            for elt in &set.elts {
                lower_expr(elt, index, out);
            }
        }
        ast::Expr::List(list) => {
            for elt in &list.elts {
                lower_expr(elt, index, out);
            }
        }
        ast::Expr::Tuple(tuple) => {
            for elt in &tuple.elts {
                lower_expr(elt, index, out);
            }
        }
        ast::Expr::ListComp(comp) => {
            lower_expr(&comp.elt, index, out);
            for generator in &comp.generators {
                lower_comprehension(generator, index, out);
            }
        }
        ast::Expr::SetComp(comp) => {
            lower_expr(&comp.elt, index, out);
            for generator in &comp.generators {
                lower_comprehension(generator, index, out);
            }
        }
        ast::Expr::DictComp(comp) => {
            lower_expr(&comp.key, index, out);
            lower_expr(&comp.value, index, out);
            for generator in &comp.generators {
                lower_comprehension(generator, index, out);
            }
        }
        ast::Expr::GeneratorExp(comp) => {
            lower_expr(&comp.elt, index, out);
            for generator in &comp.generators {
                lower_comprehension(generator, index, out);
            }
        }
        ast::Expr::Await(await_expr) => {
            lower_expr(&await_expr.value, index, out);
        }
        ast::Expr::Yield(yield_expr) => {
            if let Some(value) = &yield_expr.value {
                lower_expr(value, index, out);
            }
        }
        ast::Expr::YieldFrom(yield_from) => {
            lower_expr(&yield_from.value, index, out);
        }
        ast::Expr::Call(call) => {
            lower_expr(&call.func, index, out);
            for arg in &call.args {
                lower_expr(arg, index, out);
            }
            for keyword in &call.keywords {
                lower_expr(&keyword.value, index, out);
            }
        }
        ast::Expr::FormattedValue(formatted) => {
            lower_expr(&formatted.value, index, out);
        }
        ast::Expr::JoinedStr(joined) => {
            for value in &joined.values {
                lower_expr(value, index, out);
            }
        }
        ast::Expr::Attribute(attribute) => {
            lower_expr(&attribute.value, index, out);
        }
        ast::Expr::Subscript(subscript) => {
            lower_expr(&subscript.value, index, out);
            lower_expr(&subscript.slice, index, out);
        }
        ast::Expr::Starred(starred) => {
            lower_expr(&starred.value, index, out);
        }
        ast::Expr::Slice(slice) => {
            if let Some(lower) = &slice.lower {
                lower_expr(lower, index, out);
            }
            if let Some(upper) = &slice.upper {
                lower_expr(upper, index, out);
            }
            if let Some(step) = &slice.step {
                lower_expr(step, index, out);
            }
        }
        _ => {}
    }
}

fn lower_comprehension(
    generator: &ast::Comprehension,
    index: &LineIndex,
    out: &mut Vec<StructuralNode>,
) {
    lower_expr(&generator.iter, index, out);
    for condition in &generator.ifs {
        lower_expr(condition, index, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse_tree(source: &str) -> StructuralNode {
        match PythonAdapter::new().parse(source).unwrap() {
            SourceModel::Tree(root) => root,
            SourceModel::Text(_) => panic!("python adapter should produce a tree"),
        }
    }

    fn count_kind(root: &StructuralNode, name: &str) -> usize {
        let mut count = 0;
        root.walk(&mut |node| {
            if node.kind.name() == name {
                count += 1;
            }
        });
        count
    }

    #[test]
    fn simple_assignment_has_no_decision_nodes() {
        let root = parse_tree("x = 1\ny = x\n");
        assert_eq!(count_kind(&root, "conditional"), 0);
        assert_eq!(count_kind(&root, "loop"), 0);
    }

    #[test]
    fn conditional_carries_line_number() {
        let root = parse_tree(indoc! {"
            x = 1
            if x > 0:
                x = 2
        "});
        let mut lines = Vec::new();
        root.walk(&mut |node| {
            if node.kind == NodeKind::Conditional {
                lines.push(node.line);
            }
        });
        assert_eq!(lines, vec![2]);
    }

    #[test]
    fn elif_chain_lowers_to_nested_conditionals() {
        let root = parse_tree(indoc! {"
            if a:
                pass
            elif b:
                pass
            else:
                pass
        "});
        assert_eq!(count_kind(&root, "conditional"), 2);
    }

    #[test]
    fn boolean_chain_records_operand_count() {
        let root = parse_tree("x = a and b and c\n");
        let mut operands = None;
        root.walk(&mut |node| {
            if let NodeKind::LogicalCombinator { operands: n } = node.kind {
                operands = Some(n);
            }
        });
        assert_eq!(operands, Some(3));
    }

    #[test]
    fn chained_comparison_records_operator_count() {
        let root = parse_tree("ok = 0 < x <= 10\n");
        let mut operators = None;
        root.walk(&mut |node| {
            if let NodeKind::Comparison { operators: n } = node.kind {
                operators = Some(n);
            }
        });
        assert_eq!(operators, Some(2));
    }

    #[test]
    fn except_arms_become_handler_nodes() {
        let root = parse_tree(indoc! {"
            try:
                risky()
            except ValueError:
                pass
            except KeyError:
                pass
        "});
        assert_eq!(count_kind(&root, "exception_handler"), 2);
    }

    #[test]
    fn comparison_inside_comprehension_is_lowered() {
        let root = parse_tree("evens = [n for n in xs if n % 2 == 0]\n");
        assert_eq!(count_kind(&root, "comparison"), 1);
    }

    #[test]
    fn syntax_error_is_rejected() {
        let err = PythonAdapter::new().parse("def broken(:\n").unwrap_err();
        assert!(matches!(err, AnalyzeError::Syntax(_)));
    }
}
