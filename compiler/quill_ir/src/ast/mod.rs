//! Abstract syntax tree of the quill template language.
//!
//! Two layers: expressions (`Expr`), which produce values, and elements
//! (`Element`), which produce output or define callables. Children are owned
//! boxes; whole trees are shared between runs behind `Arc`.

mod args;
mod element;
mod expr;
mod operators;

pub use args::ArgumentList;
pub use element::{
    elements_canonical_form, AssignScope, CallableKind, DirectiveArgs, Element, ElementKind,
    MacroDef, Param,
};
pub use expr::{Expr, ExprKind};
pub use operators::{BinaryOp, UnaryOp};

#[cfg(test)]
mod tests;
