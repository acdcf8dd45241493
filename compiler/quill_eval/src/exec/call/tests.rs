#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use quill_model::errors::output_failed;
use quill_model::{EvalError, EvalErrorKind, HostMethod, HostValue, Model};

use super::host_failure_from;
use crate::output::{buffer_sink, SharedOutput};
use crate::{Configuration, Template};

fn data(entries: Vec<(&str, Model)>) -> Model {
    Model::hash(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn render(text: &str, model: Model) -> Result<String, EvalError> {
    Template::parse("call.ftl", text, &Configuration::default())
        .unwrap()
        .render(model)
}

#[test]
fn simple_method_receives_raw_values() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let join = HostMethod::simple("join", move |args| {
        record.lock().extend_from_slice(args);
        let text: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                HostValue::Str(s) => s.clone(),
                HostValue::Int(n) => n.to_string(),
                other => format!("{other:?}"),
            })
            .collect();
        Ok(HostValue::Str(text.join("-")))
    });

    let out = render("${join('a', 1 + 1)}", data(vec![("join", Model::Method(join))])).unwrap();

    assert_eq!(out, "a-2");
    assert_eq!(
        *seen.lock(),
        vec![HostValue::Str("a".into()), HostValue::Int(2)]
    );
}

#[test]
fn extended_method_receives_models() {
    let kinds = HostMethod::extended("kinds", |args| {
        let names: Vec<&str> = args.iter().map(Model::type_name).collect();
        Ok(Model::string(names.join(",")))
    });

    let out = render(
        "${kinds(1, 'x', [1], f)}<#function f></#function>",
        data(vec![("kinds", Model::Method(kinds))]),
    )
    .unwrap();

    assert_eq!(out, "integer,string,sequence,function");
}

#[test]
fn function_result_comes_from_the_register() {
    let out = render(
        "<#function twice x><#return x * 2></#function>${twice(21)}",
        Model::Nothing,
    )
    .unwrap();
    assert_eq!(out, "42");
}

#[test]
fn function_output_is_discarded() {
    let out = render(
        "<#function noisy>LOUD<#return 'quiet'></#function>[${noisy()}]",
        Model::Nothing,
    )
    .unwrap();
    assert_eq!(out, "[quiet]");
}

#[test]
fn function_without_return_yields_nothing() {
    let err = render("<#function f></#function>${f()}", Model::Nothing)
        .err()
        .unwrap();
    assert!(matches!(err.kind, EvalErrorKind::NoValue { .. }));

    let tpl = Template::parse(
        "call.ftl",
        "<#function g><#return 1></#function><#function f></#function><#assign x = g()><#assign y = f()>${x}",
        &Configuration::default(),
    )
    .unwrap();
    let out = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&out));
    env.process().unwrap();
    assert_eq!(out.contents(), "1");
    assert_eq!(env.get_variable("y"), Some(Model::Nothing));
}

#[test]
fn stale_register_value_does_not_leak_into_a_call() {
    let tpl = Template::parse(
        "call.ftl",
        "<#function f></#function><#assign y = f()>",
        &Configuration::default(),
    )
    .unwrap();
    let mut env = tpl.create_environment(Model::Nothing, buffer_sink());
    env.set_last_return_value(Model::Int(7));
    env.process().unwrap();
    assert_eq!(env.get_variable("y"), Some(Model::Nothing));
    assert_eq!(env.take_last_return_value(), None);

    let tpl = Template::parse(
        "call.ftl",
        "<#function f></#function>${f()}",
        &Configuration::default(),
    )
    .unwrap();
    let mut env = tpl.create_environment(Model::Nothing, buffer_sink());
    env.set_last_return_value(Model::Int(7));
    let err = env.process().err().unwrap();
    assert!(matches!(err.kind, EvalErrorKind::NoValue { .. }));
}

#[test]
fn failing_function_discards_output_and_restores_sink() {
    let tpl = Template::parse(
        "call.ftl",
        "<#function f>NOISE${1 / 0}</#function>[${f()}]",
        &Configuration::default(),
    )
    .unwrap();
    let out = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&out));

    let err = env.process().err().unwrap();

    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(out.contents(), "[");
    assert!(Arc::ptr_eq(env.out(), &out));
    assert_eq!(env.call_depth(), 0);
}

#[test]
fn macro_in_expression_is_rejected() {
    let err = render("<#macro m>hi</#macro>${m()}", Model::Nothing)
        .err()
        .unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::ProcedureUsedAsExpression { name: "m".into() }
    );
}

#[test]
fn non_callables_are_rejected_with_their_kind() {
    let model = data(vec![
        ("n", Model::Int(1)),
        ("s", Model::from("text")),
        ("h", data(vec![])),
    ]);
    for (expr, type_name) in [("n", "integer"), ("s", "string"), ("h", "hash")] {
        let err = render(&format!("${{{expr}(1)}}"), model.clone())
            .err()
            .unwrap();
        assert_eq!(
            err.kind,
            EvalErrorKind::NotCallable {
                expression: expr.into(),
                type_name: type_name.into()
            }
        );
    }
}

#[test]
fn host_errors_propagate() {
    let fail = HostMethod::simple("fail", |_| Err(EvalError::new("boom")));
    let err = render("${fail()}", data(vec![("fail", Model::Method(fail))]))
        .err()
        .unwrap();
    assert_eq!(err.message, "boom");
    assert!(err.location.is_some());
}

#[test]
fn output_failures_become_host_failures() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
    let converted = host_failure_from(output_failed(&io));
    assert!(matches!(
        converted.kind,
        EvalErrorKind::UnexpectedHostFailure { .. }
    ));

    let untouched = host_failure_from(EvalError::new("other"));
    assert_eq!(untouched.message, "other");
}
