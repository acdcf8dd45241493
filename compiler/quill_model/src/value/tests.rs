use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use quill_ir::{CallableKind, MacroDef, SourceFile, Span, StringInterner};

use super::*;
use crate::{Namespace, UnboundCallable};

fn callable(kind: CallableKind) -> Model {
    let interner = StringInterner::new();
    let def = MacroDef {
        name: interner.intern("m"),
        kind,
        params: Vec::new(),
        body: Vec::new(),
        span: Span::DUMMY,
    };
    let unbound = Arc::new(UnboundCallable::new(
        Arc::new(def),
        Arc::new(SourceFile::new("t.ftl", "")),
    ));
    Model::callable(BoundCallable::bind(unbound, Namespace::new()))
}

#[test]
fn type_names() {
    assert_eq!(Model::Nothing.type_name(), "nothing");
    assert_eq!(Model::from(1_i64).type_name(), "integer");
    assert_eq!(Model::from("a").type_name(), "string");
    assert_eq!(Model::sequence(vec![]).type_name(), "sequence");
    assert_eq!(callable(CallableKind::Macro).type_name(), "macro");
    assert_eq!(callable(CallableKind::Function).type_name(), "function");
}

#[test]
fn capability_selects_dispatch_path() {
    let simple = Model::Method(HostMethod::simple("s", |_| Ok(crate::HostValue::Null)));
    let extended = Model::Method(HostMethod::extended("e", |_| Ok(Model::Nothing)));
    assert_eq!(simple.capability(), CallCapability::SimpleMethod);
    assert_eq!(extended.capability(), CallCapability::ExtendedMethod);
    assert_eq!(
        callable(CallableKind::Function).capability(),
        CallCapability::Bound
    );
    assert_eq!(Model::from(true).capability(), CallCapability::None);
}

#[test]
fn display_is_interpolation_text() {
    let mut entries = BTreeMap::new();
    entries.insert("b".to_string(), Model::from(2_i64));
    entries.insert("a".to_string(), Model::from("x"));
    let nested = Model::sequence(vec![
        Model::from(1_i64),
        Model::from(1.5),
        Model::hash(entries),
    ]);
    assert_eq!(nested.to_string(), "[1, 1.5, {a: x, b: 2}]");
    assert_eq!(Model::Nothing.to_string(), "");
    assert_eq!(Model::from(2.0).to_string(), "2");
    assert_eq!(callable(CallableKind::Macro).to_string(), "<macro>");
}

#[test]
fn equality_is_structural_for_data() {
    assert_eq!(
        Model::sequence(vec![Model::from("a")]),
        Model::sequence(vec![Model::from("a")])
    );
    assert_ne!(Model::from(1_i64), Model::from(1.0));
    assert_ne!(Model::from(1e-20), Model::from(2e-20));
    assert_eq!(Model::from(0.5), Model::from(0.5));
    assert_ne!(
        callable(CallableKind::Macro),
        callable(CallableKind::Macro),
        "different namespaces"
    );
}

#[test]
fn field_access_on_hash_only() {
    let mut entries = BTreeMap::new();
    entries.insert("name".to_string(), Model::from("quill"));
    let hash = Model::hash(entries);
    assert_eq!(hash.field("name"), Some(Model::from("quill")));
    assert_eq!(hash.field("missing"), None);
    assert_eq!(Model::from("s").field("len"), None);
}
