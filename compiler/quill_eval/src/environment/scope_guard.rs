//! RAII guards over the environment.
//!
//! Both guards hold `&mut Environment` and deref to it, so evaluation
//! continues through the guard. Dropping a guard undoes what creating it did,
//! on normal return, on `?` propagation and during unwinding.

use std::ops::{Deref, DerefMut};

use quill_ir::Span;
use quill_model::{BoundCallable, EvalError};

use super::Environment;
use crate::output::SharedOutput;

/// Restores the previous output sink on drop.
pub struct OutputRedirect<'e, 't> {
    env: &'e mut Environment<'t>,
    previous: Option<SharedOutput>,
}

impl Drop for OutputRedirect<'_, '_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.env.out = previous;
        }
    }
}

impl<'t> Deref for OutputRedirect<'_, 't> {
    type Target = Environment<'t>;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl DerefMut for OutputRedirect<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}

/// Pops a callable frame (scope and call stack) on drop.
pub struct CallScope<'e, 't> {
    env: &'e mut Environment<'t>,
}

impl Drop for CallScope<'_, '_> {
    fn drop(&mut self) {
        self.env.pop_callable_frame();
    }
}

impl<'t> Deref for CallScope<'_, 't> {
    type Target = Environment<'t>;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl DerefMut for CallScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}

impl<'t> Environment<'t> {
    /// Swap in `sink` until the returned guard is dropped.
    pub fn redirect_output(&mut self, sink: SharedOutput) -> OutputRedirect<'_, 't> {
        let previous = self.set_out(sink);
        OutputRedirect {
            env: self,
            previous: Some(previous),
        }
    }

    /// Enter `bound`'s captured namespace with a fresh local scope.
    ///
    /// `call_span` is the call site in the current template; `None` when the
    /// host invokes the callable directly.
    ///
    /// Fails with `StackOverflow` when the configured depth is exceeded; in
    /// that case nothing was pushed.
    pub fn enter_callable(
        &mut self,
        bound: &BoundCallable,
        call_span: Option<Span>,
    ) -> Result<CallScope<'_, 't>, EvalError> {
        self.push_callable_frame(bound, call_span)?;
        Ok(CallScope { env: self })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
