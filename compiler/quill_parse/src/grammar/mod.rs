//! Grammar: expressions and template structure.

pub(crate) mod expr;
pub(crate) mod template;
