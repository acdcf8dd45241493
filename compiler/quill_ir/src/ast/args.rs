//! Argument lists.

use std::fmt;

use super::expr::Expr;
use crate::StringInterner;

/// Ordered argument expressions of a call, or the items of a list literal.
///
/// Built once by the parser; order is preserved all the way into the call.
#[derive(Clone, PartialEq, Default)]
pub struct ArgumentList {
    items: Vec<Expr>,
}

impl ArgumentList {
    pub fn new(items: Vec<Expr>) -> Self {
        ArgumentList { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expr> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Expr] {
        &self.items
    }

    /// Renders as a list literal: `[a, b]`.
    pub fn canonical_form(&self, interner: &StringInterner) -> String {
        let mut out = String::from("[");
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            item.write_canonical(&mut out, interner);
        }
        out.push(']');
        out
    }
}

impl FromIterator<Expr> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        ArgumentList::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}
