//! Template-defined callables.
//!
//! `UnboundCallable` is a definition as parsed: the `#macro`/`#function`
//! tree plus the template source it came from. `BoundCallable` pairs one
//! with the namespace its free variables resolve against. Copying a bound
//! callable between registries copies the pair; the captured namespace
//! never changes.

use std::fmt;
use std::sync::Arc;

use quill_ir::{MacroDef, Name, SourceFile, Span};

use crate::Namespace;

/// A macro or function definition, independent of any namespace.
pub struct UnboundCallable {
    def: Arc<MacroDef>,
    source: Arc<SourceFile>,
}

impl UnboundCallable {
    pub fn new(def: Arc<MacroDef>, source: Arc<SourceFile>) -> Self {
        UnboundCallable { def, source }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.def.name
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.def.is_function()
    }

    pub fn def(&self) -> &Arc<MacroDef> {
        &self.def
    }

    /// Template the definition was parsed from.
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    pub fn span(&self) -> Span {
        self.def.span
    }

    /// Same declared name at the same definition site.
    pub fn same_definition(&self, other: &UnboundCallable) -> bool {
        self.def.name == other.def.name
            && self.def.span == other.def.span
            && self.source.name() == other.source.name()
    }
}

impl fmt::Debug for UnboundCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundCallable")
            .field("name", &self.def.name)
            .field("kind", &self.def.kind)
            .field("source", &self.source.name())
            .field("span", &self.def.span)
            .finish()
    }
}

/// A definition paired with the namespace it resolves free variables in.
#[derive(Clone)]
pub struct BoundCallable {
    unbound: Arc<UnboundCallable>,
    namespace: Namespace,
}

impl BoundCallable {
    /// Pure construction; nothing is registered anywhere.
    pub fn bind(unbound: Arc<UnboundCallable>, namespace: Namespace) -> Self {
        BoundCallable { unbound, namespace }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.unbound.name()
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.unbound.is_function()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn unbound(&self) -> &Arc<UnboundCallable> {
        &self.unbound
    }
}

impl PartialEq for BoundCallable {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.unbound, &other.unbound)
            || self.unbound.same_definition(&other.unbound))
            && self.namespace.ptr_eq(&other.namespace)
    }
}

impl fmt::Debug for BoundCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCallable")
            .field("unbound", &self.unbound)
            .field("namespace", &self.namespace)
            .finish()
    }
}
