//! The model union: every value a template expression can produce.
//!
//! Models are immutable and cheap to clone; composite payloads sit behind
//! `Arc` so one model can be shared by many concurrent runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::callable::BoundCallable;
use crate::method::HostMethod;

/// Runtime value visible to template expressions.
#[derive(Clone, Default)]
pub enum Model {
    /// The well-defined "no value" result, e.g. of a function that never
    /// executed `<#return value>`.
    #[default]
    Nothing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Sequence(Arc<[Model]>),
    Hash(Arc<BTreeMap<String, Model>>),
    /// Host-native callable (simple or extended).
    Method(HostMethod),
    /// Template-defined macro or function paired with its captured namespace.
    Callable(Arc<BoundCallable>),
}

/// Capability tag used by call dispatch.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CallCapability {
    SimpleMethod,
    ExtendedMethod,
    Bound,
    None,
}

impl Model {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Model::Str(s.into())
    }

    pub fn sequence(items: Vec<Model>) -> Self {
        Model::Sequence(items.into())
    }

    pub fn hash(entries: BTreeMap<String, Model>) -> Self {
        Model::Hash(Arc::new(entries))
    }

    pub fn callable(callable: BoundCallable) -> Self {
        Model::Callable(Arc::new(callable))
    }

    /// Kind name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Model::Nothing => "nothing",
            Model::Bool(_) => "boolean",
            Model::Int(_) => "integer",
            Model::Float(_) => "float",
            Model::Str(_) => "string",
            Model::Sequence(_) => "sequence",
            Model::Hash(_) => "hash",
            Model::Method(_) => "method",
            Model::Callable(c) if c.is_function() => "function",
            Model::Callable(_) => "macro",
        }
    }

    pub fn capability(&self) -> CallCapability {
        match self {
            Model::Method(m) if m.is_extended() => CallCapability::ExtendedMethod,
            Model::Method(_) => CallCapability::SimpleMethod,
            Model::Callable(_) => CallCapability::Bound,
            _ => CallCapability::None,
        }
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Model::Nothing)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Model::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Model::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Model::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Field lookup for `target.field`; only hashes have fields.
    pub fn field(&self, name: &str) -> Option<Model> {
        match self {
            Model::Hash(entries) => entries.get(name).cloned(),
            _ => None,
        }
    }
}

impl From<bool> for Model {
    fn from(b: bool) -> Self {
        Model::Bool(b)
    }
}

impl From<i64> for Model {
    fn from(n: i64) -> Self {
        Model::Int(n)
    }
}

impl From<f64> for Model {
    fn from(f: f64) -> Self {
        Model::Float(f)
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::string(s)
    }
}

impl PartialEq for Model {
    #[expect(clippy::float_cmp, reason = "floats compare exactly")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Model::Nothing, Model::Nothing) => true,
            (Model::Bool(a), Model::Bool(b)) => a == b,
            (Model::Int(a), Model::Int(b)) => a == b,
            (Model::Float(a), Model::Float(b)) => a == b,
            (Model::Str(a), Model::Str(b)) => a == b,
            (Model::Sequence(a), Model::Sequence(b)) => a == b,
            (Model::Hash(a), Model::Hash(b)) => a == b,
            (Model::Method(a), Model::Method(b)) => a == b,
            (Model::Callable(a), Model::Callable(b)) => Arc::ptr_eq(a, b) || **a == **b,
            _ => false,
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Nothing => write!(f, "Nothing"),
            Model::Bool(b) => write!(f, "Bool({b})"),
            Model::Int(n) => write!(f, "Int({n})"),
            Model::Float(n) => write!(f, "Float({n})"),
            Model::Str(s) => write!(f, "Str({:?})", &**s),
            Model::Sequence(items) => write!(f, "Sequence({:?})", &**items),
            Model::Hash(entries) => write!(f, "Hash({:?})", &**entries),
            Model::Method(m) => write!(f, "{m:?}"),
            Model::Callable(c) => write!(f, "{c:?}"),
        }
    }
}

/// Text written by `${...}`.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Nothing => Ok(()),
            Model::Bool(b) => write!(f, "{b}"),
            Model::Int(n) => write!(f, "{n}"),
            Model::Float(n) => write!(f, "{n}"),
            Model::Str(s) => f.write_str(s),
            Model::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Model::Hash(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Model::Method(m) => write!(f, "<method {}>", m.name()),
            Model::Callable(_) => write!(f, "<{}>", self.type_name()),
        }
    }
}

#[cfg(test)]
mod tests;
