//! Evaluation of expressions and template elements.
//!
//! - `expr`: expression nodes and operators
//! - `call`: the `target(args...)` node and its dispatch over callee kinds
//! - `invoke`: running a bound callable's body with bound parameters
//! - `element`: template elements, `<@directive/>` calls and whole-run processing

mod call;
mod element;
mod expr;
mod invoke;

use quill_ir::Name;
use quill_model::Model;
use smallvec::SmallVec;

pub use call::host_failure_from;
pub use expr::constant_value;

/// Argument values evaluated in the caller's context.
pub type ArgValues = SmallVec<[Model; 4]>;

/// Evaluated arguments of a callable invocation.
#[derive(Clone, Debug)]
pub enum CallArgs {
    Positional(ArgValues),
    Named(Vec<(Name, Model)>),
}

impl CallArgs {
    pub fn len(&self) -> usize {
        match self {
            CallArgs::Positional(values) => values.len(),
            CallArgs::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CallArgs {
    fn default() -> Self {
        CallArgs::Positional(ArgValues::new())
    }
}

/// Whether element execution continues after a statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `<#return>` was executed; unwind to the callable boundary.
    Return,
}
