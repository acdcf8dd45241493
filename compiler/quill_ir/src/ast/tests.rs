use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Span, StringInterner};

fn e(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn ident(interner: &StringInterner, name: &str) -> Expr {
    e(ExprKind::Ident(interner.intern(name)))
}

#[test]
fn call_canonical_form_strips_list_brackets() {
    let interner = StringInterner::new();
    let call = Expr::call(
        ident(&interner, "t"),
        ArgumentList::new(vec![ident(&interner, "a"), ident(&interner, "b")]),
        Span::DUMMY,
    );
    assert_eq!(call.canonical_form(&interner), "t(a, b)");
}

#[test]
fn call_without_arguments() {
    let interner = StringInterner::new();
    let call = Expr::call(ident(&interner, "now"), ArgumentList::default(), Span::DUMMY);
    assert_eq!(call.canonical_form(&interner), "now()");
}

#[test]
fn argument_list_renders_as_list_literal() {
    let interner = StringInterner::new();
    let args = ArgumentList::new(vec![e(ExprKind::Int(1)), e(ExprKind::Bool(false))]);
    assert_eq!(args.canonical_form(&interner), "[1, false]");
    assert_eq!(
        e(ExprKind::List(args)).canonical_form(&interner),
        "[1, false]"
    );
}

#[test]
fn nested_call_on_member() {
    let interner = StringInterner::new();
    let target = e(ExprKind::Dot {
        target: Box::new(ident(&interner, "util")),
        field: interner.intern("fmt"),
    });
    let inner = Expr::call(
        ident(&interner, "g"),
        ArgumentList::new(vec![e(ExprKind::Float(1.5))]),
        Span::DUMMY,
    );
    let call = Expr::call(target, ArgumentList::new(vec![inner]), Span::DUMMY);
    assert_eq!(call.canonical_form(&interner), "util.fmt(g(1.5))");
}

#[test]
fn string_literal_is_escaped() {
    let interner = StringInterner::new();
    let s = e(ExprKind::Str(interner.intern("say \"hi\"\n")));
    assert_eq!(s.canonical_form(&interner), r#""say \"hi\"\n""#);
}

#[test]
fn whole_floats_keep_their_point() {
    let interner = StringInterner::new();
    assert_eq!(e(ExprKind::Float(2.0)).canonical_form(&interner), "2.0");
}

#[test]
fn operators_render_with_spaces() {
    let interner = StringInterner::new();
    let expr = e(ExprKind::Binary {
        op: BinaryOp::Add,
        left: Box::new(ident(&interner, "x")),
        right: Box::new(e(ExprKind::Paren(Box::new(e(ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(e(ExprKind::Int(1))),
        }))))),
    });
    assert_eq!(expr.canonical_form(&interner), "x + (-1)");
}

#[test]
fn call_is_never_literal() {
    let interner = StringInterner::new();
    let call = Expr::call(
        ident(&interner, "f"),
        ArgumentList::new(vec![e(ExprKind::Int(1))]),
        Span::DUMMY,
    );
    assert!(!call.is_literal());
    assert!(e(ExprKind::Int(1)).is_literal());
    assert!(e(ExprKind::List(ArgumentList::new(vec![e(ExprKind::Int(1))]))).is_literal());
    assert!(!ident(&interner, "x").is_literal());
}

#[test]
fn node_type_symbols() {
    let interner = StringInterner::new();
    let call = Expr::call(ident(&interner, "f"), ArgumentList::default(), Span::DUMMY);
    assert_eq!(call.node_type_symbol(), "...(...)");
    assert_eq!(
        e(ExprKind::List(ArgumentList::default())).node_type_symbol(),
        "[...]"
    );
}

#[test]
fn equality_ignores_spans() {
    let a = Expr::new(ExprKind::Int(3), Span::new(0, 1));
    let b = Expr::new(ExprKind::Int(3), Span::new(10, 11));
    assert_eq!(a, b);
}

#[test]
fn element_canonical_forms() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let m = interner.intern("m");
    let a = interner.intern("a");
    let def = MacroDef {
        name: m,
        kind: CallableKind::Macro,
        params: vec![
            Param {
                name: a,
                default: None,
            },
            Param {
                name: interner.intern("b"),
                default: Some(e(ExprKind::Int(2))),
            },
        ],
        body: vec![
            Element::new(ElementKind::Text("v=".to_string()), Span::DUMMY),
            Element::new(
                ElementKind::Interpolation(ident(&interner, "a")),
                Span::DUMMY,
            ),
        ],
        span: Span::DUMMY,
    };
    let elements = vec![
        Element::new(
            ElementKind::Assign {
                scope: AssignScope::Namespace,
                name: x,
                value: e(ExprKind::Int(0)),
            },
            Span::DUMMY,
        ),
        Element::new(ElementKind::MacroDef(Arc::new(def)), Span::DUMMY),
        Element::new(
            ElementKind::UserCall {
                target: ident(&interner, "m"),
                args: DirectiveArgs::Named(vec![(a, ident(&interner, "x"))]),
            },
            Span::DUMMY,
        ),
        Element::new(
            ElementKind::UserCall {
                target: ident(&interner, "m"),
                args: DirectiveArgs::Positional(ArgumentList::new(vec![
                    e(ExprKind::Int(1)),
                    e(ExprKind::Int(2)),
                ])),
            },
            Span::DUMMY,
        ),
    ];
    assert_eq!(
        elements_canonical_form(&elements, &interner),
        "<#assign x = 0><#macro m a b=2>v=${a}</#macro><@m a=x/><@m 1, 2/>"
    );
}

#[test]
fn function_and_return_canonical_forms() {
    let interner = StringInterner::new();
    let def = MacroDef {
        name: interner.intern("f"),
        kind: CallableKind::Function,
        params: Vec::new(),
        body: vec![Element::new(
            ElementKind::Return(Some(e(ExprKind::Int(1)))),
            Span::DUMMY,
        )],
        span: Span::DUMMY,
    };
    assert!(def.is_function());
    assert_eq!(
        def.canonical_form(&interner),
        "<#function f><#return 1></#function>"
    );
    let bare = Element::new(ElementKind::Return(None), Span::DUMMY);
    assert_eq!(bare.canonical_form(&interner), "<#return>");
    assert_eq!(bare.node_type_symbol(), "#return");
}
