//! Expression nodes.
//!
//! Expressions form an owned tree: a parent owns its children outright and the
//! whole tree is shared read-only (behind an `Arc`) by every execution of the
//! template it belongs to. Nothing here is mutated after parsing; evaluation
//! state lives in the evaluator's environment.

use std::fmt;
use std::fmt::Write as _;

use super::args::ArgumentList;
use super::operators::{BinaryOp, UnaryOp};
use crate::{Name, Span, Spanned, StringInterner};

/// Expression node.
///
/// Equality is structural and ignores spans, so a tree reparsed from its
/// canonical form compares equal to the original.
#[derive(Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression variants.
#[derive(Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),

    /// Float literal: `1.5`
    Float(f64),

    /// Boolean literal: `true`, `false`
    Bool(bool),

    /// String literal (interned, escapes already processed)
    Str(Name),

    /// Variable reference
    Ident(Name),

    /// Member access: `target.field`
    Dot { target: Box<Expr>, field: Name },

    /// Call: `target(args...)`
    Call {
        target: Box<Expr>,
        args: ArgumentList,
    },

    /// List literal: `[a, b]`
    List(ArgumentList),

    /// Parenthesized expression: `(inner)`
    Paren(Box<Expr>),

    /// Unary operation: `!operand`, `-operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Build a call node.
    pub fn call(target: Expr, args: ArgumentList, span: Span) -> Self {
        Expr::new(
            ExprKind::Call {
                target: Box::new(target),
                args,
            },
            span,
        )
    }

    /// Source-like rendering of this expression.
    pub fn canonical_form(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out, interner);
        out
    }

    pub(crate) fn write_canonical(&self, out: &mut String, interner: &StringInterner) {
        match &self.kind {
            ExprKind::Int(value) => {
                let _ = write!(out, "{value}");
            }
            ExprKind::Float(value) => {
                let _ = write!(out, "{value:?}");
            }
            ExprKind::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            ExprKind::Str(name) => write_string_literal(out, interner.lookup(*name)),
            ExprKind::Ident(name) => out.push_str(interner.lookup(*name)),
            ExprKind::Dot { target, field } => {
                target.write_canonical(out, interner);
                out.push('.');
                out.push_str(interner.lookup(*field));
            }
            ExprKind::Call { target, args } => {
                target.write_canonical(out, interner);
                out.push('(');
                let list = args.canonical_form(interner);
                // Reuse the list literal rendering with its brackets swapped out.
                let inner = list
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .unwrap_or(&list);
                out.push_str(inner);
                out.push(')');
            }
            ExprKind::List(items) => out.push_str(&items.canonical_form(interner)),
            ExprKind::Paren(inner) => {
                out.push('(');
                inner.write_canonical(out, interner);
                out.push(')');
            }
            ExprKind::Unary { op, operand } => {
                out.push_str(op.as_symbol());
                operand.write_canonical(out, interner);
            }
            ExprKind::Binary { op, left, right } => {
                left.write_canonical(out, interner);
                out.push(' ');
                out.push_str(op.as_symbol());
                out.push(' ');
                right.write_canonical(out, interner);
            }
        }
    }

    /// Short symbol naming the node kind, for tree dumps and tooling.
    pub fn node_type_symbol(&self) -> &'static str {
        match &self.kind {
            ExprKind::Int(_) | ExprKind::Float(_) => "number",
            ExprKind::Bool(_) => "boolean",
            ExprKind::Str(_) => "string",
            ExprKind::Ident(_) => "identifier",
            ExprKind::Dot { .. } => ".",
            ExprKind::Call { .. } => "...(...)",
            ExprKind::List(_) => "[...]",
            ExprKind::Paren(_) => "(...)",
            ExprKind::Unary { op, .. } => match op {
                UnaryOp::Not => "!...",
                UnaryOp::Neg => "-...",
            },
            ExprKind::Binary { op, .. } => op.as_symbol(),
        }
    }

    /// Whether the value of this expression is known without any runtime state.
    ///
    /// Calls never are, whatever their arguments.
    pub fn is_literal(&self) -> bool {
        match &self.kind {
            ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Bool(_) | ExprKind::Str(_) => true,
            ExprKind::List(items) => items.iter().all(Expr::is_literal),
            ExprKind::Paren(inner) => inner.is_literal(),
            ExprKind::Unary { operand, .. } => operand.is_literal(),
            ExprKind::Binary { left, right, .. } => left.is_literal() && right.is_literal(),
            ExprKind::Ident(_) | ExprKind::Dot { .. } | ExprKind::Call { .. } => false,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Int(v) => write!(f, "Int({v})"),
            ExprKind::Float(v) => write!(f, "Float({v:?})"),
            ExprKind::Bool(v) => write!(f, "Bool({v})"),
            ExprKind::Str(n) => write!(f, "Str({n:?})"),
            ExprKind::Ident(n) => write!(f, "Ident({n:?})"),
            ExprKind::Dot { target, field } => write!(f, "Dot({target:?}, {field:?})"),
            ExprKind::Call { target, args } => write!(f, "Call({target:?}, {args:?})"),
            ExprKind::List(items) => write!(f, "List({items:?})"),
            ExprKind::Paren(inner) => write!(f, "Paren({inner:?})"),
            ExprKind::Unary { op, operand } => write!(f, "Unary({op:?}, {operand:?})"),
            ExprKind::Binary { op, left, right } => {
                write!(f, "Binary({op:?}, {left:?}, {right:?})")
            }
        }
    }
}

/// Write a double-quoted string literal with escapes the lexer understands.
pub(crate) fn write_string_literal(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}
