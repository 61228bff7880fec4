use codegauge::analyzers::{adapter_for, SyntaxAdapter};
use codegauge::complexity::cyclomatic::calculate_cyclomatic;
use codegauge::core::Language;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn cyclomatic_for(source: &str) -> codegauge::MetricResult {
    let model = adapter_for(Language::Python).parse(source).unwrap();
    calculate_cyclomatic(&model)
}

#[test]
fn straight_line_code_has_base_complexity() {
    let result = cyclomatic_for(indoc! {"
        x = 1
        y = x + 2
        print(y)
    "});
    assert_eq!(result.value, 1.0);
    assert!(result.breakdown.is_empty());
}

#[test]
fn single_if_adds_one_path() {
    let result = cyclomatic_for(indoc! {"
        def classify(x):
            if x > 0:
                return 1
            return 0
    "});
    assert_eq!(result.value, 2.0);
}

#[test]
fn nested_ifs_each_add_one_path() {
    let result = cyclomatic_for(indoc! {"
        def check(a, b):
            if a:
                if b:
                    return True
            return False
    "});
    assert_eq!(result.value, 3.0);
}

#[test]
fn loops_add_one_path_each() {
    let result = cyclomatic_for(indoc! {"
        for i in range(10):
            while i > 0:
                i -= 1
    "});
    assert_eq!(result.value, 3.0);
}

#[test]
fn each_except_arm_adds_one_path() {
    let result = cyclomatic_for(indoc! {"
        try:
            risky()
        except ValueError:
            pass
        except KeyError:
            pass
    "});
    assert_eq!(result.value, 3.0);
}

#[test]
fn boolean_chain_adds_extra_operands() {
    // `a and b and c` has three operands, two of them extra paths
    let result = cyclomatic_for("x = a and b and c\n");
    assert_eq!(result.value, 3.0);
}

#[test]
fn chained_comparison_adds_extra_operators() {
    let result = cyclomatic_for("ok = 0 < x <= 10\n");
    assert_eq!(result.value, 2.0);
}

#[test]
fn single_comparison_is_not_a_decision_point() {
    let result = cyclomatic_for("ok = x > 0\n");
    assert_eq!(result.value, 1.0);
}

#[test]
fn breakdown_records_kind_and_line() {
    let result = cyclomatic_for(indoc! {"
        x = 1
        if x > 0:
            x = 2
    "});
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.breakdown[0].kind, "conditional");
    assert_eq!(result.breakdown[0].line, 2);
    assert_eq!(result.breakdown[0].contribution, 1.0);
}

#[test]
fn breakdown_total_matches_value() {
    let result = cyclomatic_for(indoc! {"
        def busy(a, b, c):
            if a and b:
                return 1
            for i in range(c):
                if i < a or i > b:
                    return i
            return 0
    "});
    let total: f64 = result.breakdown.iter().map(|e| e.contribution).sum();
    assert_eq!(result.value, 1.0 + total);
}
