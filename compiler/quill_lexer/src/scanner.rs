//! Template scanner.
//!
//! Splits template source into segments: static text, `${...}`
//! interpolations, `<#name ...>` directive tags, `</#name>` end tags and
//! `<@target .../>` user-directive calls. Comments (`<#-- ... -->`) are
//! dropped here. The contents of interpolations and tags are lexed into
//! tokens; everything else is kept verbatim.

use quill_ir::{Name, Span, StringInterner};

use crate::cooker::{lex_region, span_of, Mode, Terminator};
use crate::lex_error::{LexError, LexErrorKind};
use crate::token::Token;

#[derive(Clone, PartialEq, Debug)]
pub struct Segment {
    pub kind: SegmentKind,
    /// The whole segment including its delimiters.
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum SegmentKind {
    Text(String),
    Interpolation(Vec<Token>),
    /// `<#name tokens>` or `<#name tokens/>`
    Directive {
        name: Name,
        tokens: Vec<Token>,
        self_closing: bool,
    },
    /// `</#name>`
    DirectiveEnd(Name),
    /// `<@tokens/>` or `<@tokens>`
    UserCall {
        tokens: Vec<Token>,
        self_closing: bool,
    },
}

#[derive(Copy, Clone, Debug)]
enum Markup {
    Comment,
    Interpolation,
    DirectiveStart,
    DirectiveEnd,
    UserCall,
}

impl Markup {
    const fn opener_len(self) -> usize {
        match self {
            Markup::Comment => 4,
            Markup::Interpolation | Markup::DirectiveStart | Markup::UserCall => 2,
            Markup::DirectiveEnd => 3,
        }
    }
}

/// Scan a template into segments.
pub fn scan(source: &str, interner: &StringInterner) -> Result<Vec<Segment>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::new(LexErrorKind::SourceTooLarge, Span::DUMMY));
    }

    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some((at, markup)) = find_markup(source, pos) {
        push_text(&mut segments, source, text_start, at);
        let body = at + markup.opener_len();

        pos = match markup {
            Markup::Comment => {
                let Some(close) = source[body..].find("-->") else {
                    return Err(LexError::unterminated_comment(span_of(at, body)));
                };
                body + close + "-->".len()
            }
            Markup::Interpolation => {
                let lexed = lex_region(source, body, Mode::Interpolation, interner)?;
                segments.push(Segment {
                    kind: SegmentKind::Interpolation(lexed.tokens),
                    span: span_of(at, lexed.end),
                });
                lexed.end
            }
            Markup::DirectiveStart => {
                let (name, name_end) = directive_name(source, at, body, interner)?;
                let lexed = lex_region(source, name_end, Mode::Tag, interner)?;
                segments.push(Segment {
                    kind: SegmentKind::Directive {
                        name,
                        tokens: lexed.tokens,
                        self_closing: lexed.terminator == Terminator::SlashGt,
                    },
                    span: span_of(at, lexed.end),
                });
                lexed.end
            }
            Markup::DirectiveEnd => {
                let (name, name_end) = directive_name(source, at, body, interner)?;
                let rest = &source[name_end..];
                let trimmed = rest.trim_start();
                if !trimmed.starts_with('>') {
                    return Err(LexError::unterminated_tag(span_of(at, name_end)));
                }
                let end = name_end + (rest.len() - trimmed.len()) + 1;
                segments.push(Segment {
                    kind: SegmentKind::DirectiveEnd(name),
                    span: span_of(at, end),
                });
                end
            }
            Markup::UserCall => {
                let lexed = lex_region(source, body, Mode::Tag, interner)?;
                segments.push(Segment {
                    kind: SegmentKind::UserCall {
                        tokens: lexed.tokens,
                        self_closing: lexed.terminator == Terminator::SlashGt,
                    },
                    span: span_of(at, lexed.end),
                });
                lexed.end
            }
        };
        text_start = pos;
    }

    push_text(&mut segments, source, text_start, source.len());
    Ok(segments)
}

/// Find the next markup opener at or after `from`.
fn find_markup(source: &str, from: usize) -> Option<(usize, Markup)> {
    let rest = &source[from..];
    rest.match_indices(['$', '<']).find_map(|(i, _)| {
        let tail = &rest[i..];
        let markup = if tail.starts_with("${") {
            Markup::Interpolation
        } else if tail.starts_with("<#--") {
            Markup::Comment
        } else if tail.starts_with("<#") {
            Markup::DirectiveStart
        } else if tail.starts_with("</#") {
            Markup::DirectiveEnd
        } else if tail.starts_with("<@") {
            Markup::UserCall
        } else {
            return None;
        };
        Some((from + i, markup))
    })
}

fn directive_name(
    source: &str,
    tag_start: usize,
    name_start: usize,
    interner: &StringInterner,
) -> Result<(Name, usize), LexError> {
    let len = source[name_start..]
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
        .unwrap_or(source.len() - name_start);
    if len == 0 {
        return Err(LexError::missing_directive_name(span_of(
            tag_start, name_start,
        )));
    }
    let name_end = name_start + len;
    Ok((interner.intern(&source[name_start..name_end]), name_end))
}

fn push_text(segments: &mut Vec<Segment>, source: &str, start: usize, end: usize) {
    if start < end {
        segments.push(Segment {
            kind: SegmentKind::Text(source[start..end].to_string()),
            span: span_of(start, end),
        });
    }
}
