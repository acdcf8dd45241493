//! Calling conventions of the call node.
//!
//! 1. Arguments are evaluated left to right, exactly once, in the caller.
//! 2. Simple host methods see raw values; extended ones see models.
//! 3. Functions yield a value; macros cannot be called from expressions.
//! 4. Nothing a function writes reaches the caller's output.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_eval::output::{buffer_sink, SharedOutput};
use quill_eval::{Configuration, EvalErrorKind, HostMethod, HostValue, Model, Template};

type Log = Arc<Mutex<Vec<i64>>>;

/// `tick(n)` records `n` and returns it.
fn tick(log: &Log) -> Model {
    let log = Arc::clone(log);
    Model::Method(HostMethod::simple("tick", move |args| {
        let n = args.first().and_then(HostValue::as_int).unwrap_or(-1);
        log.lock().push(n);
        Ok(HostValue::Int(n))
    }))
}

/// `count(args...)` returns how many models it received.
fn count() -> Model {
    Model::Method(HostMethod::extended("count", |args| {
        Ok(Model::Int(i64::try_from(args.len()).unwrap_or(i64::MAX)))
    }))
}

fn data(entries: Vec<(&str, Model)>) -> Model {
    Model::hash(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn render(text: &str, model: Model) -> Result<String, quill_eval::EvalError> {
    Template::parse("conventions.ftl", text, &Configuration::default())
        .expect("template parses")
        .render(model)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arguments_evaluate_left_to_right_once(values in prop::collection::vec(-1000i64..1000, 0..8)) {
        let log: Log = Arc::default();
        let args: Vec<String> = values.iter().map(|n| format!("tick({n})")).collect();
        let text = format!("${{count({})}}", args.join(", "));

        let out = render(&text, data(vec![("tick", tick(&log)), ("count", count())])).unwrap();

        prop_assert_eq!(out, values.len().to_string());
        prop_assert_eq!(log.lock().clone(), values);
    }

    #[test]
    fn function_parameters_bind_in_order(a in -100i64..100, b in -100i64..100) {
        let text = format!(
            "<#function sub x y><#return x - y></#function>${{sub({a}, {b})}}"
        );
        prop_assert_eq!(render(&text, Model::Nothing).unwrap(), (a - b).to_string());
    }
}

#[test]
fn arguments_to_functions_are_evaluated_before_the_body() {
    let log: Log = Arc::default();
    let text = "<#function f a b><#assign seen = tick(0)><#return a + b></#function>${f(tick(1), tick(2))}";

    let out = render(text, data(vec![("tick", tick(&log))])).unwrap();

    assert_eq!(out, "3");
    assert_eq!(*log.lock(), vec![1, 2, 0]);
}

#[test]
fn simple_methods_get_unwrapped_values() {
    let describe = Model::Method(HostMethod::simple("describe", |args| {
        let kinds: Vec<&str> = args
            .iter()
            .map(|arg| match arg {
                HostValue::Null => "null",
                HostValue::Bool(_) => "bool",
                HostValue::Int(_) => "int",
                HostValue::Float(_) => "float",
                HostValue::Str(_) => "str",
                HostValue::List(_) => "list",
                HostValue::Map(_) => "map",
                HostValue::Opaque(_) => "opaque",
            })
            .collect();
        Ok(HostValue::Str(kinds.join(" ")))
    }));

    let out = render(
        "<#macro m></#macro>${describe(true, 1, 1.5, 's', [1], m)}",
        data(vec![("describe", describe)]),
    )
    .unwrap();

    assert_eq!(out, "bool int float str list opaque");
}

#[test]
fn method_results_are_wrapped() {
    let pair = Model::Method(HostMethod::simple("pair", |_| {
        Ok(HostValue::List(vec![HostValue::Int(1), HostValue::from("b")]))
    }));
    let out = render("${pair()}", data(vec![("pair", pair)])).unwrap();
    assert_eq!(out, "[1, b]");
}

#[test]
fn functions_and_macros_differ_in_expressions() {
    assert_eq!(
        render("<#function f><#return 'v'></#function>${f()}", Model::Nothing).unwrap(),
        "v"
    );
    let err = render("<#macro m></#macro>${m()}", Model::Nothing)
        .err()
        .unwrap();
    assert!(matches!(
        err.kind,
        EvalErrorKind::ProcedureUsedAsExpression { .. }
    ));
}

#[test]
fn function_output_never_reaches_the_caller() {
    let tpl = Template::parse(
        "quiet.ftl",
        "<#macro shout>LOUD</#macro>\
         <#function f><@shout/>noise<#return 1></#function>\
         [${f()}]<@shout/>",
        &Configuration::default(),
    )
    .unwrap();
    let out = buffer_sink();

    tpl.process(Model::Nothing, SharedOutput::clone(&out)).unwrap();

    assert_eq!(out.contents(), "[1]LOUD");
}

#[test]
fn nested_function_calls_keep_their_own_values() {
    let out = render(
        "<#function inner><#return 2></#function>\
         <#function outer><#assign i = inner()><#return i * 10></#function>\
         ${outer()}-${inner()}",
        Model::Nothing,
    )
    .unwrap();
    assert_eq!(out, "20-2");
}

#[test]
fn switching_callee_kind_changes_only_marshalling() {
    let tpl = Template::parse(
        "site.ftl",
        "${show(1, 'a', true, n + 1, [2, 3])}",
        &Configuration::default(),
    )
    .unwrap();

    let simple_seen: Arc<Mutex<Vec<HostValue>>> = Arc::default();
    let record = Arc::clone(&simple_seen);
    let simple = Model::Method(HostMethod::simple("show", move |args| {
        record.lock().extend_from_slice(args);
        Ok(HostValue::Int(i64::try_from(args.len()).unwrap_or(i64::MAX)))
    }));

    let extended_seen: Arc<Mutex<Vec<Model>>> = Arc::default();
    let record = Arc::clone(&extended_seen);
    let extended = Model::Method(HostMethod::extended("show", move |args| {
        record.lock().extend_from_slice(args);
        Ok(Model::Int(i64::try_from(args.len()).unwrap_or(i64::MAX)))
    }));

    let simple_out = tpl
        .render(data(vec![("show", simple), ("n", Model::Int(4))]))
        .unwrap();
    let extended_out = tpl
        .render(data(vec![("show", extended), ("n", Model::Int(4))]))
        .unwrap();

    assert_eq!(simple_out, "5");
    assert_eq!(extended_out, simple_out);
    assert_eq!(
        *simple_seen.lock(),
        vec![
            HostValue::Int(1),
            HostValue::from("a"),
            HostValue::Bool(true),
            HostValue::Int(5),
            HostValue::List(vec![HostValue::Int(2), HostValue::Int(3)]),
        ]
    );
    assert_eq!(
        *extended_seen.lock(),
        vec![
            Model::Int(1),
            Model::from("a"),
            Model::Bool(true),
            Model::Int(5),
            Model::sequence(vec![Model::Int(2), Model::Int(3)]),
        ]
    );
}
