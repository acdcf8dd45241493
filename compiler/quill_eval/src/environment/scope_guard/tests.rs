use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_model::{Model, Namespace};

use crate::output::{buffer_sink, SharedOutput};
use crate::{BoundCallable, Configuration, MacroEntry, Template};

fn template() -> Template {
    Template::parse("guard.ftl", "<#macro m>x</#macro>", &Configuration::default()).unwrap()
}

fn bound_m(tpl: &Template, namespace: &Namespace) -> BoundCallable {
    match tpl.macros().get("m").unwrap() {
        MacroEntry::Unbound(unbound) => BoundCallable::bind(Arc::clone(unbound), namespace.clone()),
        MacroEntry::Bound(bound) => BoundCallable::clone(bound),
    }
}

#[test]
fn redirect_restores_on_drop() {
    let tpl = template();
    let main = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&main));
    {
        let captured = buffer_sink();
        let guard = env.redirect_output(SharedOutput::clone(&captured));
        guard.write("inner").unwrap();
        assert_eq!(captured.contents(), "inner");
    }
    env.write("outer").unwrap();
    assert_eq!(main.contents(), "outer");
}

#[test]
fn redirect_restores_on_panic() {
    let tpl = template();
    let main = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&main));

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _guard = env.redirect_output(buffer_sink());
        panic!("host blew up");
    }));

    assert!(result.is_err());
    assert!(Arc::ptr_eq(env.out(), &main));
}

#[test]
fn call_scope_pushes_and_pops() {
    let tpl = template();
    let mut env = tpl.create_environment(Model::Nothing, buffer_sink());
    let other = Namespace::new();
    let bound = bound_m(&tpl, &other);
    {
        let scope = env.enter_callable(&bound, None).unwrap();
        assert_eq!(scope.call_depth(), 1);
        assert!(scope.acting_namespace().ptr_eq(&other));
    }
    assert_eq!(env.call_depth(), 0);
    assert!(env.acting_namespace().ptr_eq(env.main_namespace()));
}

#[test]
fn call_scope_refuses_past_the_limit() {
    let config = Configuration::builder().max_call_depth(1).build();
    let tpl = Template::parse("guard.ftl", "<#macro m>x</#macro>", &config).unwrap();
    let mut env = tpl.create_environment(Model::Nothing, buffer_sink());
    let namespace = env.main_namespace().clone();
    let bound = bound_m(&tpl, &namespace);

    let mut outer = env.enter_callable(&bound, None).unwrap();
    assert!(outer.enter_callable(&bound, None).is_err());
    assert_eq!(outer.call_depth(), 1);
}
