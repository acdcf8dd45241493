//! Raw host values and the wrap/unwrap capability.
//!
//! Simple host methods see `HostValue`s; everything inside a template sees
//! `Model`s. An `ObjectWrapper` converts between the two.

use std::collections::BTreeMap;
use std::fmt;

use crate::Model;

/// A plain host-language value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<HostValue>),
    Map(BTreeMap<String, HostValue>),
    /// A model with no host representation (methods, callables), passed through.
    Opaque(Model),
}

impl HostValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            HostValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            #[expect(
                clippy::cast_precision_loss,
                reason = "host code asked for a float view of an integer"
            )]
            HostValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Str(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Str(s)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Int(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

/// Converts host values into models and back.
pub trait ObjectWrapper: Send + Sync + fmt::Debug {
    fn wrap(&self, value: HostValue) -> Model;

    fn unwrap(&self, model: &Model) -> HostValue;
}

/// Structural mapping: scalars to scalars, lists to sequences, maps to hashes.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultObjectWrapper;

impl ObjectWrapper for DefaultObjectWrapper {
    fn wrap(&self, value: HostValue) -> Model {
        match value {
            HostValue::Null => Model::Nothing,
            HostValue::Bool(b) => Model::Bool(b),
            HostValue::Int(n) => Model::Int(n),
            HostValue::Float(f) => Model::Float(f),
            HostValue::Str(s) => Model::string(s),
            HostValue::List(items) => {
                Model::sequence(items.into_iter().map(|v| self.wrap(v)).collect())
            }
            HostValue::Map(entries) => Model::hash(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, self.wrap(v)))
                    .collect(),
            ),
            HostValue::Opaque(model) => model,
        }
    }

    fn unwrap(&self, model: &Model) -> HostValue {
        match model {
            Model::Nothing => HostValue::Null,
            Model::Bool(b) => HostValue::Bool(*b),
            Model::Int(n) => HostValue::Int(*n),
            Model::Float(f) => HostValue::Float(*f),
            Model::Str(s) => HostValue::Str(s.to_string()),
            Model::Sequence(items) => {
                HostValue::List(items.iter().map(|m| self.unwrap(m)).collect())
            }
            Model::Hash(entries) => HostValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.unwrap(v)))
                    .collect(),
            ),
            Model::Method(_) | Model::Callable(_) => HostValue::Opaque(model.clone()),
        }
    }
}
