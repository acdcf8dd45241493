#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_model::{BoundCallable, EvalError, EvalErrorKind, Model};
use smallvec::smallvec;

use crate::output::{buffer_sink, discard_sink, SharedOutput};
use crate::{CallArgs, Configuration, MacroEntry, Template};

fn template(text: &str) -> Template {
    Template::parse("invoke.ftl", text, &Configuration::default()).unwrap()
}

fn render(text: &str) -> Result<String, EvalError> {
    template(text).render(Model::Nothing)
}

fn callable(model: Option<Model>) -> Arc<BoundCallable> {
    match model {
        Some(Model::Callable(bound)) => bound,
        other => panic!("expected a callable, got {other:?}"),
    }
}

#[test]
fn positional_and_default_arguments() {
    let out = render("<#macro m a b=a+1>${a}/${b} </#macro><@m 1/><@m 1, 5/>").unwrap();
    assert_eq!(out, "1/2 1/5 ");
}

#[test]
fn named_arguments() {
    let out = render("<#macro m a b=2>${a}${b}</#macro><@m b=9 a=1/>").unwrap();
    assert_eq!(out, "19");
}

#[test]
fn binding_errors() {
    let too_many = render("<#macro m a></#macro><@m 1, 2/>").err().unwrap();
    assert_eq!(
        too_many.kind,
        EvalErrorKind::ArityMismatch {
            name: "m".into(),
            expected: 1,
            got: 2
        }
    );

    let unknown = render("<#macro m a></#macro><@m a=1 z=2/>").err().unwrap();
    assert_eq!(
        unknown.kind,
        EvalErrorKind::UnknownArgument {
            callable: "m".into(),
            name: "z".into()
        }
    );

    let missing = render("<#macro m a></#macro><@m/>").err().unwrap();
    assert_eq!(
        missing.kind,
        EvalErrorKind::MissingArgument {
            callable: "m".into(),
            param: "a".into()
        }
    );
}

#[test]
fn locals_do_not_leak() {
    let err = render("<#macro m><#local secret = 1></#macro><@m/>${secret}")
        .err()
        .unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "secret".into()
        }
    );
}

#[test]
fn host_invoke_writes_to_the_given_sink() {
    let tpl = template("<#macro greet who>hello ${who}</#macro>");
    let main_out = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&main_out));
    env.process().unwrap();

    let greet = callable(env.get_variable("greet"));
    let sink = buffer_sink();
    let result = env
        .invoke(
            &greet,
            CallArgs::Positional(smallvec![Model::from("bob")]),
            Some(SharedOutput::clone(&sink)),
        )
        .unwrap();

    assert_eq!(result, Model::Nothing);
    assert_eq!(sink.contents(), "hello bob");
    assert_eq!(main_out.contents(), "");
    assert!(Arc::ptr_eq(env.out(), &main_out));
}

#[test]
fn host_invoke_returns_function_value() {
    let tpl = template("<#function sq x><#return x * x></#function>");
    let mut env = tpl.create_environment(Model::Nothing, discard_sink());
    env.process().unwrap();

    let sq = callable(env.get_variable("sq"));
    let result = env
        .invoke(&sq, CallArgs::Positional(smallvec![Model::Int(7)]), None)
        .unwrap();
    assert_eq!(result, Model::Int(49));
    assert_eq!(env.take_last_return_value(), None);
}

#[test]
fn sink_is_restored_after_failure() {
    let tpl = template("<#macro boom>${1 / 0}</#macro>");
    let main_out = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&main_out));
    env.process().unwrap();

    let boom = callable(env.get_variable("boom"));
    let err = env
        .invoke(&boom, CallArgs::default(), Some(buffer_sink()))
        .err()
        .unwrap();

    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert!(Arc::ptr_eq(env.out(), &main_out));
    assert_eq!(env.call_depth(), 0);
}

#[test]
fn unbound_entries_cannot_be_invoked() {
    let tpl = template("<#macro m>x</#macro>");
    let entry = tpl.macros().get("m").cloned().unwrap();
    assert!(matches!(entry, MacroEntry::Unbound(_)));

    let mut env = tpl.create_environment(Model::Nothing, discard_sink());
    let err = env
        .invoke_entry(&entry, CallArgs::default(), None)
        .err()
        .unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::CallableNotBound { name: "m".into() }
    );
}

#[test]
fn recursion_limit_is_enforced() {
    let config = Configuration::builder().max_call_depth(16).build();
    let tpl = Template::parse("deep.ftl", "<#macro r><@r/></#macro><@r/>", &config).unwrap();
    let err = tpl.render(Model::Nothing).err().unwrap();

    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 16 });
    assert_eq!(err.backtrace.unwrap().len(), 16);
}

#[test]
fn closures_see_later_namespace_assignments() {
    let out = render("<#macro show>${x}</#macro><#assign x = 1><@show/><#assign x = 2><@show/>").unwrap();
    assert_eq!(out, "12");
}
