//! Per-run execution context.
//!
//! One `Environment` exists per processing run and is never shared. It owns
//! the current output sink, the scope chain, the return-value register and the
//! call stack. Everything it points at that outlives the run (namespaces,
//! callables, the template) is shared and safe for concurrent reads.
//!
//! Name resolution goes innermost-first: the current callable frame's
//! parameters and locals, the acting namespace, the run's globals, then the
//! data model. The acting namespace is the main namespace at top level and the
//! captured namespace while a callable body runs.

mod scope_guard;

use std::sync::Arc;

use quill_ir::{Name, SourceFile, Span, StringInterner};
use quill_model::errors::undefined_variable;
use quill_model::{BoundCallable, ErrorLocation, EvalError, EvalResult, Model, Namespace};
use rustc_hash::FxHashMap;

use crate::diagnostics::{CallFrame, CallStack};
use crate::output::SharedOutput;
use crate::{Configuration, Template};

pub use scope_guard::{CallScope, OutputRedirect};

/// One level of the scope chain.
struct Frame {
    namespace: Namespace,
    /// Parameters and `#local`s; `None` at template top level.
    locals: Option<FxHashMap<Name, Model>>,
    /// Template the running code was parsed from.
    source: Arc<SourceFile>,
}

pub struct Environment<'t> {
    template: &'t Template,
    out: SharedOutput,
    main: Namespace,
    globals: Namespace,
    data: Model,
    frames: Vec<Frame>,
    call_stack: CallStack,
    last_return_value: Option<Model>,
}

impl<'t> Environment<'t> {
    pub fn new(template: &'t Template, data: Model, out: SharedOutput) -> Self {
        let main = Namespace::new();
        Environment {
            template,
            out,
            frames: vec![Frame {
                namespace: main.clone(),
                locals: None,
                source: Arc::clone(template.source()),
            }],
            main,
            globals: Namespace::new(),
            data,
            call_stack: CallStack::new(template.config().max_call_depth()),
            last_return_value: None,
        }
    }

    pub fn template(&self) -> &'t Template {
        self.template
    }

    pub fn config(&self) -> &'t Configuration {
        self.template.config()
    }

    pub fn interner(&self) -> &'t StringInterner {
        self.template.config().interner()
    }

    /// The run's top-level namespace.
    pub fn main_namespace(&self) -> &Namespace {
        &self.main
    }

    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    /// Namespace that `#assign` writes to and free names resolve against.
    pub fn acting_namespace(&self) -> &Namespace {
        &self.innermost().namespace
    }

    pub(crate) fn current_source(&self) -> &Arc<SourceFile> {
        &self.innermost().source
    }

    fn innermost(&self) -> &Frame {
        let last = self.frames.len().saturating_sub(1);
        &self.frames[last]
    }

    // Variables

    pub fn lookup(&self, name: Name) -> Option<Model> {
        let frame = self.innermost();
        if let Some(model) = frame.locals.as_ref().and_then(|l| l.get(&name)) {
            return Some(model.clone());
        }
        frame
            .namespace
            .get(name)
            .or_else(|| self.globals.get(name))
            .or_else(|| self.data.field(self.interner().lookup(name)))
    }

    pub fn resolve(&self, name: Name) -> EvalResult {
        self.lookup(name)
            .ok_or_else(|| undefined_variable(self.interner().lookup(name)))
    }

    /// Top-level lookup: main namespace, globals, data model.
    ///
    /// Used by drivers to pull values (including closures) out after a run.
    pub fn get_variable(&self, name: &str) -> Option<Model> {
        let interned = self.interner().get(name);
        interned
            .and_then(|n| self.main.get(n).or_else(|| self.globals.get(n)))
            .or_else(|| self.data.field(name))
    }

    /// Bind in the innermost callable frame (the acting namespace at top level).
    pub fn define_local(&mut self, name: Name, model: Model) {
        let last = self.frames.len().saturating_sub(1);
        let frame = &mut self.frames[last];
        match &mut frame.locals {
            Some(locals) => {
                locals.insert(name, model);
            }
            None => frame.namespace.define(name, model),
        }
    }

    // Output

    pub fn out(&self) -> &SharedOutput {
        &self.out
    }

    /// Install `sink`, returning the previous one. Prefer `redirect_output`,
    /// which restores automatically.
    pub fn set_out(&mut self, sink: SharedOutput) -> SharedOutput {
        std::mem::replace(&mut self.out, sink)
    }

    pub fn write(&self, text: &str) -> Result<(), EvalError> {
        self.out.write_str(text)
    }

    // Return-value register

    pub fn set_last_return_value(&mut self, model: Model) {
        self.last_return_value = Some(model);
    }

    /// Read-once: the register is empty afterwards.
    pub fn take_last_return_value(&mut self) -> Option<Model> {
        self.last_return_value.take()
    }

    pub fn clear_last_return_value(&mut self) {
        self.last_return_value = None;
    }

    // Calls

    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    fn push_callable_frame(
        &mut self,
        bound: &BoundCallable,
        call_span: Option<Span>,
    ) -> Result<(), EvalError> {
        let call_site = call_span.map(|span| (Arc::clone(self.current_source()), span));
        self.call_stack.push(CallFrame {
            name: bound.name(),
            call_site,
        })?;
        self.frames.push(Frame {
            namespace: bound.namespace().clone(),
            locals: Some(FxHashMap::default()),
            source: Arc::clone(bound.unbound().source()),
        });
        Ok(())
    }

    fn pop_callable_frame(&mut self) {
        debug_assert!(self.frames.len() > 1, "popped the top-level frame");
        self.frames.pop();
        self.call_stack.pop();
    }

    /// Attach location and backtrace unless a deeper node already did.
    pub(crate) fn locate(&self, err: EvalError, span: Span) -> EvalError {
        if err.is_located() {
            return err;
        }
        err.with_location(ErrorLocation::new(Arc::clone(self.current_source()), span))
            .with_backtrace(self.call_stack.capture(self.interner()))
    }
}

#[cfg(test)]
mod tests;
