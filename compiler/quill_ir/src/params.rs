//! Uniform parameter introspection over expression nodes.
//!
//! Every node exposes its children as an indexable list of (value, role)
//! pairs so formatters and analyzers can walk the tree without matching on
//! each node kind.

use std::fmt;

use crate::ast::{Expr, ExprKind};
use crate::Name;

/// The role a child plays in its parent node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParameterRole {
    Callee,
    ArgumentValue,
    ItemValue,
    LeftHandOperand,
    RightHandOperand,
    Operand,
    EnclosedOperand,
    AstNodeSubtype,
}

impl ParameterRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Callee => "callee",
            Self::ArgumentValue => "argument value",
            Self::ItemValue => "item value",
            Self::LeftHandOperand => "left-hand operand",
            Self::RightHandOperand => "right-hand operand",
            Self::Operand => "operand",
            Self::EnclosedOperand => "enclosed operand",
            Self::AstNodeSubtype => "AST-node subtype",
        }
    }
}

impl fmt::Display for ParameterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A child of a node.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ParameterValue<'a> {
    Expr(&'a Expr),
    Name(Name),
    Symbol(&'static str),
}

impl<'a> ParameterValue<'a> {
    pub fn as_expr(self) -> Option<&'a Expr> {
        match self {
            ParameterValue::Expr(expr) => Some(expr),
            ParameterValue::Name(_) | ParameterValue::Symbol(_) => None,
        }
    }
}

/// Introspection index past the node's parameter count.
///
/// Tooling misuse, not a template error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParameterIndexOutOfRange {
    pub index: usize,
    pub count: usize,
}

impl fmt::Display for ParameterIndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parameter index {} out of range for node with {} parameters",
            self.index, self.count
        )
    }
}

impl std::error::Error for ParameterIndexOutOfRange {}

impl Expr {
    pub fn parameter_count(&self) -> usize {
        match &self.kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::Str(_)
            | ExprKind::Ident(_) => 0,
            ExprKind::Call { args, .. } => 1 + args.len(),
            ExprKind::List(items) => items.len(),
            ExprKind::Dot { .. } | ExprKind::Unary { .. } => 2,
            ExprKind::Paren(_) => 1,
            ExprKind::Binary { .. } => 3,
        }
    }

    pub fn parameter_value(&self, index: usize) -> Result<ParameterValue<'_>, ParameterIndexOutOfRange> {
        self.parameter(index).map(|(value, _)| value)
    }

    pub fn parameter_role(&self, index: usize) -> Result<ParameterRole, ParameterIndexOutOfRange> {
        self.parameter(index).map(|(_, role)| role)
    }

    /// Value and role of the child at `index`.
    pub fn parameter(
        &self,
        index: usize,
    ) -> Result<(ParameterValue<'_>, ParameterRole), ParameterIndexOutOfRange> {
        let out_of_range = ParameterIndexOutOfRange {
            index,
            count: self.parameter_count(),
        };
        let found = match (&self.kind, index) {
            (ExprKind::Call { target, .. }, 0) => {
                Some((ParameterValue::Expr(target), ParameterRole::Callee))
            }
            (ExprKind::Call { args, .. }, i) => args
                .get(i - 1)
                .map(|arg| (ParameterValue::Expr(arg), ParameterRole::ArgumentValue)),
            (ExprKind::List(items), i) => items
                .get(i)
                .map(|item| (ParameterValue::Expr(item), ParameterRole::ItemValue)),
            (ExprKind::Dot { target, .. }, 0) => {
                Some((ParameterValue::Expr(target), ParameterRole::LeftHandOperand))
            }
            (ExprKind::Dot { field, .. }, 1) => {
                Some((ParameterValue::Name(*field), ParameterRole::RightHandOperand))
            }
            (ExprKind::Paren(inner), 0) => {
                Some((ParameterValue::Expr(inner), ParameterRole::EnclosedOperand))
            }
            (ExprKind::Unary { operand, .. }, 0) => {
                Some((ParameterValue::Expr(operand), ParameterRole::Operand))
            }
            (ExprKind::Unary { op, .. }, 1) => {
                Some((ParameterValue::Symbol(op.as_symbol()), ParameterRole::AstNodeSubtype))
            }
            (ExprKind::Binary { left, .. }, 0) => {
                Some((ParameterValue::Expr(left), ParameterRole::LeftHandOperand))
            }
            (ExprKind::Binary { right, .. }, 1) => {
                Some((ParameterValue::Expr(right), ParameterRole::RightHandOperand))
            }
            (ExprKind::Binary { op, .. }, 2) => {
                Some((ParameterValue::Symbol(op.as_symbol()), ParameterRole::AstNodeSubtype))
            }
            _ => None,
        };
        found.ok_or(out_of_range)
    }
}
