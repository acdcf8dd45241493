//! Parsed templates and captured closures are shared by concurrent runs.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use quill_eval::output::discard_sink;
use quill_eval::{Configuration, MacroEntry, Model, Template};
use rayon::prelude::*;

fn data(n: i64) -> Model {
    let mut map = BTreeMap::new();
    map.insert("n".to_string(), Model::Int(n));
    Model::hash(map)
}

#[test]
fn one_template_many_runs() {
    let tpl = Template::parse(
        "shared.ftl",
        "<#function sq x><#return x * x></#function><#macro show v>${v}</#macro><@show sq(n)/>",
        &Configuration::default(),
    )
    .unwrap();

    let outputs: Vec<String> = (0..64i64)
        .into_par_iter()
        .map(|n| tpl.render(data(n)).unwrap())
        .collect();

    let expected: Vec<String> = (0..64i64).map(|n| (n * n).to_string()).collect();
    assert_eq!(outputs, expected);
}

#[test]
fn copied_definitions_bind_per_run() {
    let config = Configuration::default();
    let source = Template::parse("a.ftl", "<#macro show>${n}</#macro>", &config).unwrap();
    let mut target = Template::parse("b.ftl", "<#assign n = n + 1><@show/>", &config).unwrap();
    target.add_macro(source.macros().get("show").cloned().unwrap());

    let outputs: Vec<String> = (0..32i64)
        .into_par_iter()
        .map(|n| target.render(data(n)).unwrap())
        .collect();

    let expected: Vec<String> = (1..33i64).map(|n| n.to_string()).collect();
    assert_eq!(outputs, expected);
}

#[test]
fn shared_closure_is_usable_from_many_runs() {
    let config = Configuration::default();
    let counter = Template::parse(
        "counter.ftl",
        "<#assign hits = 0><#macro hit><#assign hits = hits + 1></#macro>",
        &config,
    )
    .unwrap();
    let mut env = counter.create_environment(Model::Nothing, discard_sink());
    env.process().unwrap();
    let hit = MacroEntry::from_model(&env.get_variable("hit").unwrap()).unwrap();

    let mut caller = Template::parse("caller.ftl", "<@hit/>", &config).unwrap();
    caller.add_macro(hit);

    (0..16).into_par_iter().for_each(|_| {
        caller.render(Model::Nothing).unwrap();
    });

    // Each run's read-then-write is not atomic, so only bounds are guaranteed.
    let Some(Model::Int(hits)) = env.get_variable("hits") else {
        panic!("hits is an integer");
    };
    assert!((1..=16).contains(&hits));
}
