//! Processing configuration shared by templates.
//!
//! Templates that exchange callables must be parsed under the same
//! `Configuration`, because interned names are only meaningful within the
//! interner that produced them.

use std::fmt;
use std::sync::Arc;

use quill_ir::SharedInterner;
use quill_model::{DefaultObjectWrapper, ObjectWrapper};

/// Cheaply clonable, `Send + Sync` configuration.
#[derive(Clone)]
pub struct Configuration {
    interner: SharedInterner,
    wrapper: Arc<dyn ObjectWrapper>,
    max_call_depth: Option<usize>,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn object_wrapper(&self) -> &dyn ObjectWrapper {
        &*self.wrapper
    }

    /// Maximum nesting of macro/function calls; `None` is unlimited.
    pub fn max_call_depth(&self) -> Option<usize> {
        self.max_call_depth
    }
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigurationBuilder::new().build()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("interner", &self.interner)
            .field("wrapper", &self.wrapper)
            .field("max_call_depth", &self.max_call_depth)
            .finish()
    }
}

/// Builder for [`Configuration`].
pub struct ConfigurationBuilder {
    interner: Option<SharedInterner>,
    wrapper: Option<Arc<dyn ObjectWrapper>>,
    max_call_depth: Option<usize>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            interner: None,
            wrapper: None,
            max_call_depth: None,
        }
    }

    /// Share an existing interner (e.g. one already used by the parser).
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn object_wrapper(mut self, wrapper: Arc<dyn ObjectWrapper>) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Limit call nesting. Without a limit, deep recursion relies on stack growth.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            interner: self.interner.unwrap_or_default(),
            wrapper: self
                .wrapper
                .unwrap_or_else(|| Arc::new(DefaultObjectWrapper)),
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
