//! Quill IR - syntax tree and supporting types for the quill template language.
//!
//! This crate contains:
//! - `Name` and `StringInterner` for interned identifiers
//! - `Span` and `SourceFile` for source locations
//! - AST nodes (`Expr`, `Element`, `MacroDef`)
//! - The node contract shared by all expression kinds: canonical form,
//!   parameter introspection and identifier-substitution cloning
//!
//! Trees are immutable once built. Structural equality ignores spans.

pub mod ast;
mod interner;
mod name;
mod params;
mod span;
mod substitute;

pub use ast::{
    elements_canonical_form, ArgumentList, AssignScope, BinaryOp, CallableKind, DirectiveArgs,
    Element, ElementKind, Expr, ExprKind, MacroDef, Param, UnaryOp,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use params::{ParameterIndexOutOfRange, ParameterRole, ParameterValue};
pub use span::{SourceFile, Span, SpanError, Spanned};
