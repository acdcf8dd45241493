//! The call node: `target(args...)` in expression position.
//!
//! The callee decides everything. Host methods receive their arguments
//! either converted to raw host values (simple) or as models (extended).
//! Template functions run with output discarded and hand back whatever the
//! return-value register holds afterwards. Macros are rejected: they only
//! run as directives.

use quill_ir::{ArgumentList, Expr};
use quill_model::errors::{not_callable, procedure_used_as_expression, unexpected_host_failure};
use quill_model::{
    BoundCallable, EvalError, EvalErrorKind, EvalResult, HostArguments, HostMethod, HostValue,
    Model,
};

use super::{ArgValues, CallArgs};
use crate::output::discard_sink;
use crate::Environment;

impl Environment<'_> {
    pub(crate) fn eval_call(
        &mut self,
        call: &Expr,
        target: &Expr,
        args: &ArgumentList,
    ) -> EvalResult {
        let callee = self.eval_expr(target)?;
        tracing::trace!(capability = ?callee.capability(), args = args.len(), "dispatching call");
        match callee {
            Model::Method(method) => self.call_method(&method, args),
            Model::Callable(bound) => self.call_function(call, &bound, args),
            Model::Nothing
            | Model::Bool(_)
            | Model::Int(_)
            | Model::Float(_)
            | Model::Str(_)
            | Model::Sequence(_)
            | Model::Hash(_) => Err(not_callable(
                &target.canonical_form(self.interner()),
                callee.type_name(),
            )),
        }
    }

    /// Evaluate call arguments left to right in the caller's context.
    pub(crate) fn eval_arguments(&mut self, args: &ArgumentList) -> Result<ArgValues, EvalError> {
        let mut values = ArgValues::with_capacity(args.len());
        for arg in args.iter() {
            values.push(self.eval_expr(arg)?);
        }
        Ok(values)
    }

    fn call_method(&mut self, method: &HostMethod, args: &ArgumentList) -> EvalResult {
        let values = self.eval_arguments(args)?;
        let wrapper = self.config().object_wrapper();
        tracing::trace!(
            method = method.name(),
            extended = method.is_extended(),
            args = values.len(),
            "calling host method"
        );
        if method.is_extended() {
            method.call(HostArguments::Models(&values), wrapper)
        } else {
            let raw: Vec<HostValue> = values.iter().map(|model| wrapper.unwrap(model)).collect();
            method.call(HostArguments::Values(&raw), wrapper)
        }
    }

    fn call_function(&mut self, call: &Expr, bound: &BoundCallable, args: &ArgumentList) -> EvalResult {
        // A stale value from an earlier call must never leak out of this one.
        self.clear_last_return_value();
        if !bound.is_function() {
            return Err(procedure_used_as_expression(
                self.interner().lookup(bound.name()),
            ));
        }
        self.run_silenced(call, bound, args)
            .map_err(host_failure_from)?;
        Ok(self.take_last_return_value().unwrap_or_default())
    }

    fn run_silenced(
        &mut self,
        call: &Expr,
        bound: &BoundCallable,
        args: &ArgumentList,
    ) -> Result<(), EvalError> {
        let mut env = self.redirect_output(discard_sink());
        let values = env.eval_arguments(args)?;
        env.invoke_body(bound, CallArgs::Positional(values), Some(call.span))
    }
}

/// Recast an output failure raised while a function ran as an unexpected
/// failure of the call. Location and backtrace are kept; other errors pass
/// through untouched.
pub fn host_failure_from(err: EvalError) -> EvalError {
    let EvalErrorKind::OutputFailed { message } = &err.kind else {
        return err;
    };
    let wrapped = unexpected_host_failure(message);
    EvalError {
        location: err.location,
        backtrace: err.backtrace,
        ..wrapped
    }
}

#[cfg(test)]
mod tests;
