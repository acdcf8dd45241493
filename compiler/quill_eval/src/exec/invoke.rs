//! Running a bound callable's body.

use std::sync::Arc;

use quill_ir::{MacroDef, Span};
use quill_model::errors::{arity_mismatch, callable_not_bound, missing_argument, unknown_argument};
use quill_model::{BoundCallable, EvalError, EvalResult, Model};
use quill_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::CallArgs;
use crate::output::SharedOutput;
use crate::{Environment, MacroEntry};

impl Environment<'_> {
    /// Invoke `bound` from the host.
    ///
    /// With `sink`, output goes there for the duration of the call and the
    /// previous sink is restored afterwards, also on error. Functions yield
    /// their `<#return>` value (`Nothing` if none ran); macros yield `Nothing`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn invoke(
        &mut self,
        bound: &BoundCallable,
        args: CallArgs,
        sink: Option<SharedOutput>,
    ) -> EvalResult {
        tracing::debug!(
            callable = self.interner().lookup(bound.name()),
            args = args.len(),
            "invoking"
        );
        if bound.is_function() {
            self.clear_last_return_value();
        }
        match sink {
            Some(sink) => self.redirect_output(sink).invoke_body(bound, args, None)?,
            None => self.invoke_body(bound, args, None)?,
        }
        if bound.is_function() {
            Ok(self.take_last_return_value().unwrap_or_default())
        } else {
            Ok(Model::Nothing)
        }
    }

    /// Invoke a registry entry. Unbound definitions have no namespace to
    /// run in and are refused.
    pub fn invoke_entry(
        &mut self,
        entry: &MacroEntry,
        args: CallArgs,
        sink: Option<SharedOutput>,
    ) -> EvalResult {
        match entry {
            MacroEntry::Bound(bound) => self.invoke(bound, args, sink),
            MacroEntry::Unbound(unbound) => {
                Err(callable_not_bound(self.interner().lookup(unbound.name())))
            }
        }
    }

    /// Push a frame for `bound`, bind parameters and run the body.
    pub(crate) fn invoke_body(
        &mut self,
        bound: &BoundCallable,
        args: CallArgs,
        call_span: Option<Span>,
    ) -> Result<(), EvalError> {
        let def = Arc::clone(bound.unbound().def());
        ensure_sufficient_stack(|| {
            let mut scope = self.enter_callable(bound, call_span)?;
            scope.bind_parameters(&def, args)?;
            scope.exec_elements(&def.body)?;
            if !def.is_function() {
                // Macros never leave a value behind.
                scope.clear_last_return_value();
            }
            Ok(())
        })
    }

    /// Bind arguments to parameters in the fresh callee frame.
    ///
    /// Defaults are evaluated in the callee frame in declaration order, so a
    /// default may refer to the parameters before it.
    fn bind_parameters(&mut self, def: &MacroDef, args: CallArgs) -> Result<(), EvalError> {
        let callable = self.interner().lookup(def.name);
        let mut supplied: SmallVec<[Option<Model>; 4]> =
            def.params.iter().map(|_| None).collect();
        match args {
            CallArgs::Positional(values) => {
                if values.len() > def.params.len() {
                    return Err(arity_mismatch(callable, def.params.len(), values.len()));
                }
                for (slot, value) in supplied.iter_mut().zip(values) {
                    *slot = Some(value);
                }
            }
            CallArgs::Named(values) => {
                for (name, value) in values {
                    let slot = def
                        .param_index(name)
                        .and_then(|index| supplied.get_mut(index))
                        .ok_or_else(|| unknown_argument(callable, self.interner().lookup(name)))?;
                    *slot = Some(value);
                }
            }
        }
        for (param, value) in def.params.iter().zip(supplied) {
            let value = match (value, &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default)?,
                (None, None) => {
                    return Err(missing_argument(
                        callable,
                        self.interner().lookup(param.name),
                    ))
                }
            };
            self.define_local(param.name, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
