//! Identifier-substitution cloning.
//!
//! Produces a new tree in which every free reference to one identifier is
//! replaced by a copy of a replacement expression. The original tree is never
//! touched, since the same subtree may be shared by several call sites.

use std::sync::Arc;

use crate::ast::{
    ArgumentList, DirectiveArgs, Element, ElementKind, Expr, ExprKind, MacroDef, Param,
};
use crate::Name;

impl Expr {
    #[must_use]
    pub fn deep_clone_with_identifier_replaced(&self, name: Name, replacement: &Expr) -> Expr {
        let kind = match &self.kind {
            ExprKind::Ident(ident) if *ident == name => return replacement.clone(),
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::Str(_)
            | ExprKind::Ident(_) => self.kind.clone(),
            // The field of a dot access is a key, not a variable reference.
            ExprKind::Dot { target, field } => ExprKind::Dot {
                target: Box::new(target.deep_clone_with_identifier_replaced(name, replacement)),
                field: *field,
            },
            ExprKind::Call { target, args } => ExprKind::Call {
                target: Box::new(target.deep_clone_with_identifier_replaced(name, replacement)),
                args: args.deep_clone_with_identifier_replaced(name, replacement),
            },
            ExprKind::List(items) => {
                ExprKind::List(items.deep_clone_with_identifier_replaced(name, replacement))
            }
            ExprKind::Paren(inner) => ExprKind::Paren(Box::new(
                inner.deep_clone_with_identifier_replaced(name, replacement),
            )),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op: *op,
                operand: Box::new(operand.deep_clone_with_identifier_replaced(name, replacement)),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op: *op,
                left: Box::new(left.deep_clone_with_identifier_replaced(name, replacement)),
                right: Box::new(right.deep_clone_with_identifier_replaced(name, replacement)),
            },
        };
        Expr::new(kind, self.span)
    }
}

impl ArgumentList {
    #[must_use]
    pub fn deep_clone_with_identifier_replaced(&self, name: Name, replacement: &Expr) -> Self {
        self.iter()
            .map(|arg| arg.deep_clone_with_identifier_replaced(name, replacement))
            .collect()
    }
}

impl MacroDef {
    /// Specialize a definition for one binding of `name`.
    ///
    /// A parameter called `name` shadows it, in which case the definition is
    /// returned unchanged.
    #[must_use]
    pub fn deep_clone_with_identifier_replaced(&self, name: Name, replacement: &Expr) -> Self {
        if self.param_index(name).is_some() {
            return self.clone();
        }
        MacroDef {
            name: self.name,
            kind: self.kind,
            params: self
                .params
                .iter()
                .map(|param| Param {
                    name: param.name,
                    default: param
                        .default
                        .as_ref()
                        .map(|d| d.deep_clone_with_identifier_replaced(name, replacement)),
                })
                .collect(),
            body: self
                .body
                .iter()
                .map(|element| element.deep_clone_with_identifier_replaced(name, replacement))
                .collect(),
            span: self.span,
        }
    }
}

impl Element {
    #[must_use]
    pub fn deep_clone_with_identifier_replaced(&self, name: Name, replacement: &Expr) -> Self {
        let kind = match &self.kind {
            ElementKind::Text(_) => self.kind.clone(),
            ElementKind::Interpolation(expr) => ElementKind::Interpolation(
                expr.deep_clone_with_identifier_replaced(name, replacement),
            ),
            ElementKind::Assign {
                scope,
                name: target,
                value,
            } => ElementKind::Assign {
                scope: *scope,
                name: *target,
                value: value.deep_clone_with_identifier_replaced(name, replacement),
            },
            ElementKind::MacroDef(def) => ElementKind::MacroDef(Arc::new(
                def.deep_clone_with_identifier_replaced(name, replacement),
            )),
            ElementKind::Return(value) => ElementKind::Return(
                value
                    .as_ref()
                    .map(|v| v.deep_clone_with_identifier_replaced(name, replacement)),
            ),
            ElementKind::UserCall { target, args } => ElementKind::UserCall {
                target: target.deep_clone_with_identifier_replaced(name, replacement),
                args: match args {
                    DirectiveArgs::Named(named) => DirectiveArgs::Named(
                        named
                            .iter()
                            .map(|(arg, value)| {
                                (*arg, value.deep_clone_with_identifier_replaced(name, replacement))
                            })
                            .collect(),
                    ),
                    DirectiveArgs::Positional(positional) => DirectiveArgs::Positional(
                        positional.deep_clone_with_identifier_replaced(name, replacement),
                    ),
                },
            },
        };
        Element::new(kind, self.span)
    }
}
