#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use quill_model::{EvalErrorKind, Model};

use crate::output::{buffer_sink, discard_sink, SharedOutput};
use crate::{Configuration, Template};

fn template() -> Template {
    Template::parse("env.ftl", "", &Configuration::default()).unwrap()
}

fn data(key: &str, value: Model) -> Model {
    let mut map = BTreeMap::new();
    map.insert(key.to_string(), value);
    Model::hash(map)
}

#[test]
fn lookup_order_main_globals_data() {
    let tpl = template();
    let mut env = tpl.create_environment(data("x", Model::from("data")), discard_sink());
    let x = env.interner().intern("x");

    assert_eq!(env.lookup(x), Some(Model::from("data")));
    env.globals().define(x, Model::from("global"));
    assert_eq!(env.lookup(x), Some(Model::from("global")));
    env.define_local(x, Model::from("main"));
    assert_eq!(env.lookup(x), Some(Model::from("main")));
    assert_eq!(env.get_variable("x"), Some(Model::from("main")));
}

#[test]
fn top_level_locals_land_in_the_main_namespace() {
    let tpl = template();
    let mut env = tpl.create_environment(Model::Nothing, discard_sink());
    let name = env.interner().intern("v");
    env.define_local(name, Model::Int(1));
    assert!(env.main_namespace().contains(name));
    assert!(env.acting_namespace().ptr_eq(env.main_namespace()));
}

#[test]
fn resolve_reports_undefined_names() {
    let tpl = template();
    let env = tpl.create_environment(Model::Nothing, discard_sink());
    let name = env.interner().intern("ghost");
    let err = env.resolve(name).err().unwrap();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "ghost".into()
        }
    );
    assert_eq!(env.get_variable("never-interned"), None);
}

#[test]
fn return_register_is_read_once() {
    let tpl = template();
    let mut env = tpl.create_environment(Model::Nothing, discard_sink());
    env.set_last_return_value(Model::Int(5));
    assert_eq!(env.take_last_return_value(), Some(Model::Int(5)));
    assert_eq!(env.take_last_return_value(), None);

    env.set_last_return_value(Model::Int(6));
    env.clear_last_return_value();
    assert_eq!(env.take_last_return_value(), None);
}

#[test]
fn set_out_returns_previous_sink() {
    let tpl = template();
    let first = buffer_sink();
    let mut env = tpl.create_environment(Model::Nothing, SharedOutput::clone(&first));
    let second = buffer_sink();

    let previous = env.set_out(SharedOutput::clone(&second));
    env.write("x").unwrap();

    assert!(SharedOutput::ptr_eq(&previous, &first));
    assert_eq!(second.contents(), "x");
    assert_eq!(first.contents(), "");
}

#[test]
fn runs_are_independent() {
    let tpl = Template::parse(
        "runs.ftl",
        "<#assign n = 1>${n}",
        &Configuration::default(),
    )
    .unwrap();
    let mut first = tpl.create_environment(Model::Nothing, discard_sink());
    first.process().unwrap();
    let second = tpl.create_environment(Model::Nothing, discard_sink());

    assert_eq!(first.get_variable("n"), Some(Model::Int(1)));
    assert_eq!(second.get_variable("n"), None);
}
