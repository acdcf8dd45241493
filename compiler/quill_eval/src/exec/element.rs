//! Template elements and whole-run processing.

use std::sync::Arc;

use quill_ir::{AssignScope, DirectiveArgs, Element, ElementKind, Expr, Span};
use quill_model::errors::{function_used_as_directive, no_value, not_a_directive};
use quill_model::{EvalError, Model, UnboundCallable};

use super::{CallArgs, Flow};
use crate::{Environment, MacroEntry};

impl Environment<'_> {
    /// Run the template: hoist its macro registry into the main namespace,
    /// then execute the top-level elements.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn process(&mut self) -> Result<(), EvalError> {
        let template = self.template();
        tracing::debug!(template = template.name(), "processing");
        self.hoist_macros();
        self.exec_elements(template.elements())?;
        Ok(())
    }

    /// Register every registry entry under its declared name. Unbound
    /// definitions bind to this run; bound ones keep their own namespace.
    fn hoist_macros(&self) {
        let template = self.template();
        let main = self.main_namespace();
        for (key, entry) in template.macros().iter() {
            let name = entry.name();
            let declared = self.interner().lookup(name);
            if key != declared {
                tracing::warn!(
                    key = key.as_str(),
                    name = declared,
                    "registry key differs from the callable's name; using the name"
                );
            }
            tracing::trace!(name = declared, bound = matches!(entry, MacroEntry::Bound(_)), "hoisting");
            match entry {
                MacroEntry::Unbound(unbound) => main.define_callable(name, Arc::clone(unbound)),
                MacroEntry::Bound(bound) => main.define(name, Model::Callable(Arc::clone(bound))),
            }
        }
    }

    /// Execute `elements` in order, stopping at `<#return>`.
    pub fn exec_elements(&mut self, elements: &[Element]) -> Result<Flow, EvalError> {
        for element in elements {
            if self.exec_element(element)? == Flow::Return {
                return Ok(Flow::Return);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn exec_element(&mut self, element: &Element) -> Result<Flow, EvalError> {
        self.exec_element_inner(element)
            .map_err(|err| self.locate(err, element.span))
    }

    fn exec_element_inner(&mut self, element: &Element) -> Result<Flow, EvalError> {
        match &element.kind {
            ElementKind::Text(text) => self.write(text)?,
            ElementKind::Interpolation(expr) => {
                let value = self.eval_expr(expr)?;
                if value.is_nothing() {
                    return Err(no_value(&expr.canonical_form(self.interner())));
                }
                self.write(&value.to_string())?;
            }
            ElementKind::Assign { scope, name, value } => {
                let value = self.eval_expr(value)?;
                match scope {
                    AssignScope::Namespace => self.acting_namespace().define(*name, value),
                    AssignScope::Global => self.globals().define(*name, value),
                    AssignScope::Local => self.define_local(*name, value),
                }
            }
            ElementKind::MacroDef(def) => {
                let unbound = UnboundCallable::new(Arc::clone(def), Arc::clone(self.current_source()));
                self.acting_namespace()
                    .define_callable(def.name, Arc::new(unbound));
            }
            ElementKind::Return(value) => {
                if let Some(expr) = value {
                    let value = self.eval_expr(expr)?;
                    self.set_last_return_value(value);
                }
                return Ok(Flow::Return);
            }
            ElementKind::UserCall { target, args } => {
                self.exec_user_call(target, args, element.span)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// `<@target args/>`: run a macro with output going to the current sink.
    fn exec_user_call(
        &mut self,
        target: &Expr,
        args: &DirectiveArgs,
        span: Span,
    ) -> Result<(), EvalError> {
        let bound = match self.eval_expr(target)? {
            Model::Callable(bound) => bound,
            other => {
                return Err(not_a_directive(
                    &target.canonical_form(self.interner()),
                    other.type_name(),
                ))
            }
        };
        if bound.is_function() {
            return Err(function_used_as_directive(
                self.interner().lookup(bound.name()),
            ));
        }
        let args = match args {
            DirectiveArgs::Named(items) => {
                let mut values = Vec::with_capacity(items.len());
                for (name, expr) in items {
                    values.push((*name, self.eval_expr(expr)?));
                }
                CallArgs::Named(values)
            }
            DirectiveArgs::Positional(list) => CallArgs::Positional(self.eval_arguments(list)?),
        };
        self.invoke_body(&bound, args, Some(span))
    }
}
