//! Template elements (statements) and macro/function definitions.

use std::fmt;
use std::sync::Arc;

use super::args::ArgumentList;
use super::expr::Expr;
use crate::{Name, Span, Spanned, StringInterner};

/// Which scope an assignment directive writes to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignScope {
    /// `<#assign>`: the acting namespace.
    Namespace,
    /// `<#global>`: the per-run global scope.
    Global,
    /// `<#local>`: the innermost callable frame.
    Local,
}

impl AssignScope {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Namespace => "assign",
            Self::Global => "global",
            Self::Local => "local",
        }
    }
}

/// Function/procedure discriminator of a definition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallableKind {
    /// `<#macro>`: invoked as a directive, writes to output, yields no value.
    Macro,
    /// `<#function>`: invoked from expressions, yields a value via `<#return>`.
    Function,
}

impl CallableKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Macro => "macro",
            Self::Function => "function",
        }
    }
}

/// A formal parameter, optionally with a default-value expression.
#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub name: Name,
    pub default: Option<Expr>,
}

/// A `<#macro>` or `<#function>` definition as it appears in source.
#[derive(Clone)]
pub struct MacroDef {
    pub name: Name,
    pub kind: CallableKind,
    pub params: Vec<Param>,
    pub body: Vec<Element>,
    pub span: Span,
}

impl MacroDef {
    #[inline]
    pub fn is_function(&self) -> bool {
        self.kind == CallableKind::Function
    }

    pub fn param_index(&self, name: Name) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub fn canonical_form(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out, interner);
        out
    }

    fn write_canonical(&self, out: &mut String, interner: &StringInterner) {
        let keyword = self.kind.keyword();
        out.push_str("<#");
        out.push_str(keyword);
        out.push(' ');
        out.push_str(interner.lookup(self.name));
        for param in &self.params {
            out.push(' ');
            out.push_str(interner.lookup(param.name));
            if let Some(default) = &param.default {
                out.push('=');
                default.write_canonical(out, interner);
            }
        }
        out.push('>');
        write_elements(out, &self.body, interner);
        out.push_str("</#");
        out.push_str(keyword);
        out.push('>');
    }
}

impl PartialEq for MacroDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.params == other.params
            && self.body == other.body
    }
}

impl fmt::Debug for MacroDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Arguments of a user-directive call.
#[derive(Clone, PartialEq, Debug)]
pub enum DirectiveArgs {
    /// `<@m a=1 b=x/>`
    Named(Vec<(Name, Expr)>),
    /// `<@m 1, x/>`
    Positional(ArgumentList),
}

impl DirectiveArgs {
    pub fn is_empty(&self) -> bool {
        match self {
            DirectiveArgs::Named(args) => args.is_empty(),
            DirectiveArgs::Positional(args) => args.is_empty(),
        }
    }
}

/// Template element.
#[derive(Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ElementKind {
    /// Static text.
    Text(String),
    /// `${expr}`
    Interpolation(Expr),
    /// `<#assign name = value>` and friends.
    Assign {
        scope: AssignScope,
        name: Name,
        value: Expr,
    },
    /// `<#macro ...>` / `<#function ...>`
    MacroDef(Arc<MacroDef>),
    /// `<#return>` / `<#return value>`
    Return(Option<Expr>),
    /// `<@target args/>`
    UserCall { target: Expr, args: DirectiveArgs },
}

impl Element {
    pub fn new(kind: ElementKind, span: Span) -> Self {
        Element { kind, span }
    }

    pub fn canonical_form(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out, interner);
        out
    }

    fn write_canonical(&self, out: &mut String, interner: &StringInterner) {
        match &self.kind {
            ElementKind::Text(text) => out.push_str(text),
            ElementKind::Interpolation(expr) => {
                out.push_str("${");
                expr.write_canonical(out, interner);
                out.push('}');
            }
            ElementKind::Assign { scope, name, value } => {
                out.push_str("<#");
                out.push_str(scope.keyword());
                out.push(' ');
                out.push_str(interner.lookup(*name));
                out.push_str(" = ");
                value.write_canonical(out, interner);
                out.push('>');
            }
            ElementKind::MacroDef(def) => def.write_canonical(out, interner),
            ElementKind::Return(None) => out.push_str("<#return>"),
            ElementKind::Return(Some(value)) => {
                out.push_str("<#return ");
                value.write_canonical(out, interner);
                out.push('>');
            }
            ElementKind::UserCall { target, args } => {
                out.push_str("<@");
                target.write_canonical(out, interner);
                match args {
                    DirectiveArgs::Named(named) => {
                        for (name, value) in named {
                            out.push(' ');
                            out.push_str(interner.lookup(*name));
                            out.push('=');
                            value.write_canonical(out, interner);
                        }
                    }
                    DirectiveArgs::Positional(positional) if !positional.is_empty() => {
                        out.push(' ');
                        for (i, value) in positional.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            value.write_canonical(out, interner);
                        }
                    }
                    DirectiveArgs::Positional(_) => {}
                }
                out.push_str("/>");
            }
        }
    }

    pub fn node_type_symbol(&self) -> &'static str {
        match &self.kind {
            ElementKind::Text(_) => "#text",
            ElementKind::Interpolation(_) => "${...}",
            ElementKind::Assign { scope, .. } => match scope {
                AssignScope::Namespace => "#assign",
                AssignScope::Global => "#global",
                AssignScope::Local => "#local",
            },
            ElementKind::MacroDef(def) => match def.kind {
                CallableKind::Macro => "#macro",
                CallableKind::Function => "#function",
            },
            ElementKind::Return(_) => "#return",
            ElementKind::UserCall { .. } => "@",
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Spanned for Element {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Canonical form of a sequence of elements (a template body).
pub fn elements_canonical_form(elements: &[Element], interner: &StringInterner) -> String {
    let mut out = String::new();
    write_elements(&mut out, elements, interner);
    out
}

fn write_elements(out: &mut String, elements: &[Element], interner: &StringInterner) {
    for element in elements {
        element.write_canonical(out, interner);
    }
}
