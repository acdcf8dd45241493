//! Escape processing for string literals.
//!
//! Both quote styles share one escape set: `\"` `\'` `\\` `\n` `\t` `\r`.

use quill_ir::Span;

use crate::lex_error::LexError;

/// Unescape a string literal's content (between the quotes).
///
/// Fast path: if there are no backslashes, returns `Ok(None)` so the caller
/// can intern the source slice directly.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32, checked once by the scanner"
)]
pub(crate) fn unescape(content: &str, base_offset: u32) -> Result<Option<String>, LexError> {
    if !content.contains('\\') {
        return Ok(None);
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let resolved = match chars.next() {
            Some((_, '"')) => '"',
            Some((_, '\'')) => '\'',
            Some((_, '\\')) => '\\',
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, 'r')) => '\r',
            Some((j, other)) => {
                let start = base_offset + i as u32;
                let end = base_offset + (j + other.len_utf8()) as u32;
                return Err(LexError::invalid_string_escape(
                    Span::new(start, end),
                    other,
                ));
            }
            None => {
                let start = base_offset + i as u32;
                return Err(LexError::invalid_string_escape(
                    Span::new(start, start + 1),
                    '\\',
                ));
            }
        };
        result.push(resolved);
    }
    Ok(Some(result))
}
