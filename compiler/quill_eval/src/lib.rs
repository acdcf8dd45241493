#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add noise across every crate"
)]
//! Quill Eval - template evaluator for the quill template language.
//!
//! This crate runs parsed templates:
//! - `Template`: a parsed template plus its editable macro registry
//! - `Environment`: per-run state (output sink, scopes, return-value register)
//! - `exec`: expressions, the call node, callable invocation and elements
//! - `output`: output sinks and the discard sink used while functions run
//! - `diagnostics`: the call stack and error rendering
//!
//! # Calling conventions
//!
//! A `target(args...)` expression dispatches on what `target` evaluates to.
//! Host methods get their arguments as raw host values or as models,
//! depending on their kind. Template functions run with output discarded and
//! yield the value of the `<#return>` they executed. Macros are directives
//! only (`<@m/>`) and write to the current output.
//!
//! Value types and errors come from `quill_model` and are re-exported here.

mod config;
pub mod diagnostics;
mod environment;
pub mod exec;
pub mod output;
mod template;

/// Error type and constructors (canonical path is `quill_model::errors`).
pub mod errors {
    pub use quill_model::errors::*;
}

pub use config::{Configuration, ConfigurationBuilder};
pub use environment::{CallScope, Environment, OutputRedirect};
pub use exec::{constant_value, host_failure_from, ArgValues, CallArgs, Flow};
pub use template::{MacroEntry, MacroTable, Template, TemplateParseError};

pub use quill_model::{
    BoundCallable, CallCapability, DefaultObjectWrapper, EvalError, EvalErrorKind, EvalResult,
    HostArguments, HostMethod, HostValue, Model, Namespace, ObjectWrapper, UnboundCallable,
};
