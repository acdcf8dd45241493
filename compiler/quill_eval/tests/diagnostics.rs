//! Error reports for failures raised during evaluation.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use quill_eval::diagnostics::render;
use quill_eval::{Configuration, EvalErrorKind, Model, Template};

fn failure(text: &str) -> quill_eval::EvalError {
    Template::parse("report.ftl", text, &Configuration::default())
        .expect("template parses")
        .render(Model::Nothing)
        .expect_err("rendering fails")
}

#[test]
fn report_names_message_and_position() {
    let report = render(&failure("line one\n${nope}"));

    assert!(report.starts_with("error: undefined variable: nope"));
    assert!(report.contains("report.ftl:2:3"));
}

#[test]
fn report_lists_calls_innermost_first() {
    let err = failure(
        "<#macro a>${1 / 0}</#macro>\n\
         <#macro b><@a/></#macro>\n\
         <@b/>",
    );
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);

    let report = render(&err);
    let a = report.find("0: a called at report.ftl:2:").unwrap();
    let b = report.find("1: b called at report.ftl:3:").unwrap();
    assert!(a < b);
}

#[test]
fn misuse_reports_suggest_the_right_form() {
    let report = render(&failure("<#macro m></#macro>${m()}"));
    assert!(report.contains("<@m .../>"));
}
