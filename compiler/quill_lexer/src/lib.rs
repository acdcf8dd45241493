//! Lexer for the quill template language, built on logos.
//!
//! Two entry points:
//! - [`scan`] splits a whole template into [`Segment`]s, lexing the inside of
//!   every interpolation and tag into [`Token`]s.
//! - [`lex_expression`] lexes a standalone expression.

mod cooker;
mod escape;
mod lex_error;
mod raw_token;
mod scanner;
mod token;

use quill_ir::{Span, StringInterner};

pub use lex_error::{LexError, LexErrorKind};
pub use scanner::{scan, Segment, SegmentKind};
pub use token::{Token, TokenKind};

/// Lex a standalone expression (no surrounding `${ }`).
///
/// A `>` here is always a comparison.
pub fn lex_expression(source: &str, interner: &StringInterner) -> Result<Vec<Token>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::new(LexErrorKind::SourceTooLarge, Span::DUMMY));
    }
    cooker::lex_region(source, 0, cooker::Mode::Free, interner).map(|lexed| lexed.tokens)
}
