//! Parsed templates and their macro registries.
//!
//! A `Template` is immutable once parsed except for its `MacroTable`, which
//! callers may edit before processing (copying callables between templates).
//! Editing the table only swaps shared handles; no binding is ever changed.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use quill_ir::{elements_canonical_form, Element, Name, SharedInterner, SourceFile};
use quill_model::{BoundCallable, EvalError, Model, UnboundCallable};
use quill_parse::{parse_template, ParseError};

use crate::output::{buffer_sink, SharedOutput};
use crate::{Configuration, Environment};

/// What a macro registry stores.
#[derive(Clone, Debug)]
pub enum MacroEntry {
    /// A definition parsed from a template; binds to whichever run hoists it.
    Unbound(Arc<UnboundCallable>),
    /// A closure captured from a run; keeps its namespace wherever it goes.
    Bound(Arc<BoundCallable>),
}

impl MacroEntry {
    /// Declared name of the callable, independent of any registry key.
    pub fn name(&self) -> Name {
        match self {
            MacroEntry::Unbound(u) => u.name(),
            MacroEntry::Bound(b) => b.name(),
        }
    }

    pub fn is_function(&self) -> bool {
        match self {
            MacroEntry::Unbound(u) => u.is_function(),
            MacroEntry::Bound(b) => b.is_function(),
        }
    }

    pub fn unbound(&self) -> &Arc<UnboundCallable> {
        match self {
            MacroEntry::Unbound(u) => u,
            MacroEntry::Bound(b) => b.unbound(),
        }
    }

    /// Entry for a model extracted from a run, if it is a callable.
    pub fn from_model(model: &Model) -> Option<MacroEntry> {
        match model {
            Model::Callable(bound) => Some(MacroEntry::Bound(Arc::clone(bound))),
            _ => None,
        }
    }
}

impl From<Arc<BoundCallable>> for MacroEntry {
    fn from(bound: Arc<BoundCallable>) -> Self {
        MacroEntry::Bound(bound)
    }
}

impl From<Arc<UnboundCallable>> for MacroEntry {
    fn from(unbound: Arc<UnboundCallable>) -> Self {
        MacroEntry::Unbound(unbound)
    }
}

/// Per-template registry of callables, keyed by an external string.
///
/// The key is cosmetic: hoisting registers every entry under the callable's
/// declared name.
#[derive(Clone)]
pub struct MacroTable {
    interner: SharedInterner,
    entries: BTreeMap<String, MacroEntry>,
}

impl MacroTable {
    pub fn new(interner: SharedInterner) -> Self {
        MacroTable {
            interner,
            entries: BTreeMap::new(),
        }
    }

    /// Register under the entry's declared name.
    pub fn add(&mut self, entry: MacroEntry) -> Option<MacroEntry> {
        let key = self.interner.lookup(entry.name()).to_string();
        self.entries.insert(key, entry)
    }

    /// Register under an arbitrary key.
    pub fn insert(&mut self, key: impl Into<String>, entry: MacroEntry) -> Option<MacroEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&MacroEntry> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<MacroEntry> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MacroEntry> {
        self.entries.iter()
    }

    /// Entry-set view; values may be replaced in place.
    pub fn entries_mut(&mut self) -> btree_map::IterMut<'_, String, MacroEntry> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MacroTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// A parse failure together with the source it points into.
#[derive(Clone, Debug)]
pub struct TemplateParseError {
    pub error: ParseError,
    pub source: Arc<SourceFile>,
}

impl TemplateParseError {
    pub fn render(&self) -> String {
        self.error.render(&self.source)
    }
}

impl fmt::Display for TemplateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for TemplateParseError {}

/// A parsed template ready for processing.
#[derive(Clone, Debug)]
pub struct Template {
    source: Arc<SourceFile>,
    elements: Arc<[Element]>,
    macros: MacroTable,
    config: Configuration,
}

impl Template {
    /// Parse `text`; every `#macro`/`#function` lands in the registry,
    /// later definitions replacing earlier ones of the same name.
    pub fn parse(
        name: &str,
        text: &str,
        config: &Configuration,
    ) -> Result<Template, TemplateParseError> {
        let source = Arc::new(SourceFile::new(name, text));
        let parsed = parse_template(text, config.interner()).map_err(|error| {
            TemplateParseError {
                error,
                source: Arc::clone(&source),
            }
        })?;
        let mut macros = MacroTable::new(config.interner().clone());
        for def in parsed.macros {
            macros.add(MacroEntry::Unbound(Arc::new(UnboundCallable::new(
                def,
                Arc::clone(&source),
            ))));
        }
        tracing::debug!(template = name, macros = macros.len(), "parsed template");
        Ok(Template {
            source,
            elements: parsed.elements.into(),
            macros,
            config: config.clone(),
        })
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn macros_mut(&mut self) -> &mut MacroTable {
        &mut self.macros
    }

    /// Register a callable under its declared name.
    pub fn add_macro(&mut self, entry: MacroEntry) {
        self.macros.add(entry);
    }

    pub fn canonical_form(&self) -> String {
        elements_canonical_form(&self.elements, self.config.interner())
    }

    /// Fresh per-run environment. `data` is the data model hash
    /// (`Model::Nothing` for none).
    pub fn create_environment(&self, data: Model, out: SharedOutput) -> Environment<'_> {
        Environment::new(self, data, out)
    }

    /// Run the template, writing to `out`.
    pub fn process(&self, data: Model, out: SharedOutput) -> Result<(), EvalError> {
        let mut env = self.create_environment(data, out);
        env.process()?;
        env.out().flush()
    }

    /// Run the template into a string.
    pub fn render(&self, data: Model) -> Result<String, EvalError> {
        let out = buffer_sink();
        self.process(data, SharedOutput::clone(&out))?;
        Ok(out.contents())
    }
}
