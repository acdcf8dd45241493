//! Host-native callables.
//!
//! A `HostMethod` comes in two flavors that differ only in how arguments are
//! marshalled: simple methods receive unwrapped `HostValue`s, extended
//! methods receive `Model`s. Calling one with the other representation is a
//! contract violation reported as `ArgumentMarshallingMismatch`.

use std::fmt;
use std::sync::Arc;

use crate::errors::{argument_marshalling_mismatch, EvalError, EvalResult};
use crate::host::{HostValue, ObjectWrapper};
use crate::Model;

pub type SimpleFn = dyn Fn(&[HostValue]) -> Result<HostValue, EvalError> + Send + Sync;
pub type ExtendedFn = dyn Fn(&[Model]) -> EvalResult + Send + Sync;

#[derive(Clone)]
enum MethodBody {
    Simple(Arc<SimpleFn>),
    Extended(Arc<ExtendedFn>),
}

/// Argument representation handed to a host method.
#[derive(Copy, Clone, Debug)]
pub enum HostArguments<'a> {
    Values(&'a [HostValue]),
    Models(&'a [Model]),
}

impl HostArguments<'_> {
    const fn describe(self) -> &'static str {
        match self {
            HostArguments::Values(_) => "raw values",
            HostArguments::Models(_) => "models",
        }
    }
}

/// A named host callable.
#[derive(Clone)]
pub struct HostMethod {
    name: Arc<str>,
    body: MethodBody,
}

impl HostMethod {
    pub fn simple<F>(name: &str, f: F) -> Self
    where
        F: Fn(&[HostValue]) -> Result<HostValue, EvalError> + Send + Sync + 'static,
    {
        HostMethod {
            name: name.into(),
            body: MethodBody::Simple(Arc::new(f)),
        }
    }

    pub fn extended<F>(name: &str, f: F) -> Self
    where
        F: Fn(&[Model]) -> EvalResult + Send + Sync + 'static,
    {
        HostMethod {
            name: name.into(),
            body: MethodBody::Extended(Arc::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_extended(&self) -> bool {
        matches!(self.body, MethodBody::Extended(_))
    }

    /// Invoke with already-marshalled arguments and wrap the result.
    pub fn call(&self, args: HostArguments<'_>, wrapper: &dyn ObjectWrapper) -> EvalResult {
        match (&self.body, args) {
            (MethodBody::Simple(f), HostArguments::Values(values)) => Ok(wrapper.wrap(f(values)?)),
            (MethodBody::Extended(f), HostArguments::Models(models)) => f(models),
            (MethodBody::Simple(_), got @ HostArguments::Models(_)) => Err(
                argument_marshalling_mismatch(&self.name, "raw values", got.describe()),
            ),
            (MethodBody::Extended(_), got @ HostArguments::Values(_)) => Err(
                argument_marshalling_mismatch(&self.name, "models", got.describe()),
            ),
        }
    }
}

impl PartialEq for HostMethod {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && match (&self.body, &other.body) {
                (MethodBody::Simple(a), MethodBody::Simple(b)) => Arc::ptr_eq(a, b),
                (MethodBody::Extended(a), MethodBody::Extended(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for HostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flavor = if self.is_extended() {
            "extended"
        } else {
            "simple"
        };
        write!(f, "HostMethod({}, {flavor})", self.name)
    }
}

#[cfg(test)]
mod tests;
