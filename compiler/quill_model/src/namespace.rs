//! Template namespaces: the unit of scope captured by closures.
//!
//! A namespace is shared (`Arc`) between the run that populates it and every
//! `BoundCallable` that captured it, so a closure keeps seeing its defining
//! template's variables after being copied elsewhere.
//!
//! Callables bound to the namespace that stores them are kept as their
//! unbound definition and re-bound on lookup, including when they sit inside
//! a sequence or hash. Storing them bound would make the namespace own a
//! reference to itself.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use quill_ir::Name;
use rustc_hash::FxHashMap;

use crate::callable::{BoundCallable, UnboundCallable};
use crate::Model;

/// A binding as stored. Only `Own` and the composites wrapping it mention
/// this namespace, and they do so without holding it.
#[derive(Clone)]
enum Slot {
    Value(Model),
    Own(Arc<UnboundCallable>),
    Sequence(Arc<[Slot]>),
    Hash(Arc<BTreeMap<String, Slot>>),
}

/// Shared, interior-mutable variable scope.
#[derive(Clone, Default)]
pub struct Namespace {
    slots: Arc<RwLock<FxHashMap<Name, Slot>>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a binding. Own definitions come back bound to `self`.
    pub fn get(&self, name: Name) -> Option<Model> {
        let slot = self.slots.read().get(&name).cloned()?;
        Some(self.attach(&slot))
    }

    pub fn contains(&self, name: Name) -> bool {
        self.slots.read().contains_key(&name)
    }

    /// Bind `name` to `model`, replacing any previous binding.
    pub fn define(&self, name: Name, model: Model) {
        let slot = self.detach(model);
        self.slots.write().insert(name, slot);
    }

    /// Bind `name` to a definition closed over this namespace.
    pub fn define_callable(&self, name: Name, unbound: Arc<UnboundCallable>) {
        self.slots.write().insert(name, Slot::Own(unbound));
    }

    pub fn remove(&self, name: Name) -> Option<Model> {
        let removed = self.slots.write().remove(&name)?;
        Some(self.attach(&removed))
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Names currently bound, in no particular order.
    pub fn names(&self) -> Vec<Name> {
        self.slots.read().keys().copied().collect()
    }

    /// Whether both handles refer to the same namespace.
    #[inline]
    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

impl Namespace {
    /// Whether `model` holds a callable bound to this namespace anywhere.
    fn refers_to_self(&self, model: &Model) -> bool {
        match model {
            Model::Callable(bound) => bound.namespace().ptr_eq(self),
            Model::Sequence(items) => items.iter().any(|item| self.refers_to_self(item)),
            Model::Hash(entries) => entries.values().any(|value| self.refers_to_self(value)),
            _ => false,
        }
    }

    fn detach(&self, model: Model) -> Slot {
        if !self.refers_to_self(&model) {
            return Slot::Value(model);
        }
        match model {
            Model::Callable(bound) => Slot::Own(Arc::clone(bound.unbound())),
            Model::Sequence(items) => {
                Slot::Sequence(items.iter().map(|item| self.detach(item.clone())).collect())
            }
            Model::Hash(entries) => Slot::Hash(Arc::new(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.detach(value.clone())))
                    .collect(),
            )),
            model => Slot::Value(model),
        }
    }

    fn attach(&self, slot: &Slot) -> Model {
        match slot {
            Slot::Value(model) => model.clone(),
            Slot::Own(unbound) => {
                Model::callable(BoundCallable::bind(Arc::clone(unbound), self.clone()))
            }
            Slot::Sequence(items) => {
                Model::sequence(items.iter().map(|item| self.attach(item)).collect())
            }
            Slot::Hash(entries) => Model::hash(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.attach(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Namespace({:p}, {} bindings)",
            Arc::as_ptr(&self.slots),
            self.len()
        )
    }
}
