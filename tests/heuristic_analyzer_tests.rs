use codegauge::core::errors::AnalyzeError;
use codegauge::core::Language;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn javascript_syntax_errors_abort_the_request() {
    let err = codegauge::analyze_source("function broken( {\n", Language::JavaScript).unwrap_err();
    match err {
        AnalyzeError::Syntax(message) => {
            assert!(message.contains("JavaScript syntax error"), "{message}")
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn straight_line_javascript_scores_the_baseline() {
    let report = codegauge::analyze_source(
        indoc! {r#"
            const x = 1;
            const y = x + 2;
            console.log(y);
        "#},
        Language::JavaScript,
    )
    .unwrap();
    assert_eq!(report.metrics.cyclomatic_complexity.result.value, 1.0);
    assert_eq!(report.metrics.cognitive_complexity.result.value, 0.0);
}

#[test]
fn simple_branch_lands_in_the_native_range() {
    // Calibration case: one function, one if, no further nesting.
    let report = codegauge::analyze_source(
        indoc! {r#"
            function classify(x) {
              if (x > 0) {
                return 1;
              }
              return 0;
            }
        "#},
        Language::JavaScript,
    )
    .unwrap();

    assert_eq!(report.metrics.cyclomatic_complexity.result.value, 2.0);
    assert_eq!(report.metrics.cognitive_complexity.result.value, 1.0);
    // brace depth 2 weights the base: 2 * (1 + 0.2)
    let wcc = report.metrics.weighted_complexity.result.value;
    assert!((wcc - 2.4).abs() < 1e-9, "got {wcc}");
}

#[test]
fn logical_operators_count_as_decision_points() {
    let report = codegauge::analyze_source(
        "const ok = a && b || c;\n",
        Language::JavaScript,
    )
    .unwrap();
    // one `&&` plus one `||`
    assert_eq!(report.metrics.cyclomatic_complexity.result.value, 3.0);
}

#[test]
fn nested_branches_pay_the_line_scan_penalty() {
    let report = codegauge::analyze_source(
        indoc! {r#"
            if (a) {
              if (b) {
                f();
              }
            }
        "#},
        Language::JavaScript,
    )
    .unwrap();
    // outer 1, inner 1 + nesting 1
    assert_eq!(report.metrics.cognitive_complexity.result.value, 3.0);
}

#[test]
fn comment_lines_are_ignored_by_the_scans() {
    let report = codegauge::analyze_source(
        indoc! {r#"
            // if (this) { were real it would count }
            const x = 1;
        "#},
        Language::JavaScript,
    )
    .unwrap();
    assert_eq!(report.metrics.cognitive_complexity.result.value, 0.0);
}

#[test]
fn javascript_report_never_carries_a_quality_assessment() {
    let report = codegauge::analyze_source("const x = 1;\n", Language::JavaScript).unwrap();
    assert!(report.quality.is_none());
}

#[test]
fn report_language_tag_round_trips() {
    let report = codegauge::analyze_source("const x = 1;\n", Language::JavaScript).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["language"], "javascript");
}
