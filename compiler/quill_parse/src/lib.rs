//! Parser for the quill template language.
//!
//! Consumes the segments produced by `quill_lexer::scan` and builds the
//! immutable element tree from `quill_ir`. Only the subset the evaluator
//! needs is recognized: text, `${...}`, `#assign`/`#global`/`#local`,
//! `#macro`/`#function` definitions, `#return` and `<@.../>` calls.

mod cursor;
mod error;
mod grammar;

use std::sync::Arc;

use quill_ir::{elements_canonical_form, Element, Expr, MacroDef, Span, StringInterner};
use tracing::debug;

pub use error::{ParseError, ParseErrorKind};

/// Result of parsing one template.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedTemplate {
    /// Top-level elements in source order, definitions included.
    pub elements: Vec<Element>,
    /// Every macro and function defined in the template, in source order.
    pub macros: Vec<Arc<MacroDef>>,
}

impl ParsedTemplate {
    pub fn canonical_form(&self, interner: &StringInterner) -> String {
        elements_canonical_form(&self.elements, interner)
    }
}

/// Parse a whole template.
pub fn parse_template(source: &str, interner: &StringInterner) -> Result<ParsedTemplate, ParseError> {
    let segments = quill_lexer::scan(source, interner)?;
    let parsed = grammar::template::TemplateParser::new(interner).parse(segments)?;
    debug!(
        elements = parsed.elements.len(),
        macros = parsed.macros.len(),
        "parsed template"
    );
    Ok(parsed)
}

/// Parse a standalone expression such as `t(a, b)`.
pub fn parse_expression(source: &str, interner: &StringInterner) -> Result<Expr, ParseError> {
    let tokens = quill_lexer::lex_expression(source, interner)?;
    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    let mut c = cursor::Cursor::new(&tokens, Span::new(end, end));
    let expr = grammar::expr::parse_expr(&mut c)?;
    c.expect_end("the end of the expression")?;
    Ok(expr)
}

#[cfg(test)]
mod tests;
