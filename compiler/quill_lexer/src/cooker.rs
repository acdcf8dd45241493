//! Token cooking: runs logos over a region of source and converts raw tokens
//! into [`Token`]s, stopping at the region's terminator.

use logos::Logos;
use quill_ir::{Span, StringInterner};

use crate::escape::unescape;
use crate::lex_error::LexError;
use crate::raw_token::RawToken;
use crate::token::{Token, TokenKind};

/// What ends the region being lexed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Mode {
    /// `${ ... }`: ends at the first `}` outside brackets.
    Interpolation,
    /// `<#name ... >` / `<@ ... />`: ends at `>` or `/>` outside brackets.
    Tag,
    /// A standalone expression: runs to the end of input.
    Free,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Terminator {
    Brace,
    Gt,
    SlashGt,
    End,
}

pub(crate) struct Lexed {
    pub tokens: Vec<Token>,
    /// Byte offset just past the terminator.
    pub end: usize,
    pub terminator: Terminator,
}

impl Lexed {
    fn new(tokens: Vec<Token>, end: usize, terminator: Terminator) -> Self {
        Lexed {
            tokens,
            end,
            terminator,
        }
    }
}

/// Span from byte offsets; callers have already checked the source fits `u32`.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "source length checked against u32::MAX before lexing"
)]
pub(crate) fn span_of(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

pub(crate) fn lex_region(
    source: &str,
    start: usize,
    mode: Mode,
    interner: &StringInterner,
) -> Result<Lexed, LexError> {
    let mut logos = RawToken::lexer(&source[start..]);
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let at_top = |depth: usize, wanted: Mode| depth == 0 && mode == wanted;

    while let Some(result) = logos.next() {
        let range = logos.span();
        let (lo, hi) = (start + range.start, start + range.end);
        let span = span_of(lo, hi);
        let Ok(raw) = result else {
            return Err(LexError::invalid_token(span));
        };

        let kind = match raw {
            RawToken::RBrace if at_top(depth, Mode::Interpolation) => {
                return Ok(Lexed::new(tokens, hi, Terminator::Brace));
            }
            RawToken::Gt if at_top(depth, Mode::Tag) => {
                return Ok(Lexed::new(tokens, hi, Terminator::Gt));
            }
            // `<#assign x = 1>=` : the tag ends at the `>`.
            RawToken::GtEq if at_top(depth, Mode::Tag) => {
                return Ok(Lexed::new(tokens, lo + 1, Terminator::Gt));
            }
            RawToken::SlashGt if at_top(depth, Mode::Tag) => {
                return Ok(Lexed::new(tokens, hi, Terminator::SlashGt));
            }
            RawToken::SlashGt => {
                tokens.push(Token::new(TokenKind::Slash, span_of(lo, lo + 1)));
                tokens.push(Token::new(TokenKind::Gt, span_of(lo + 1, hi)));
                continue;
            }
            RawToken::LParen | RawToken::LBracket => {
                depth += 1;
                if raw == RawToken::LParen {
                    TokenKind::LParen
                } else {
                    TokenKind::LBracket
                }
            }
            RawToken::RParen | RawToken::RBracket => {
                depth = depth.saturating_sub(1);
                if raw == RawToken::RParen {
                    TokenKind::RParen
                } else {
                    TokenKind::RBracket
                }
            }
            other => convert(other, logos.slice(), span, interner)?,
        };
        tokens.push(Token::new(kind, span));
    }

    match mode {
        Mode::Free => Ok(Lexed::new(tokens, source.len(), Terminator::End)),
        Mode::Interpolation => Err(LexError::unterminated_interpolation(span_of(
            start.saturating_sub(2),
            source.len(),
        ))),
        Mode::Tag => Err(LexError::unterminated_tag(span_of(start, source.len()))),
    }
}

/// Convert a raw token to a `TokenKind`, parsing and interning literals.
fn convert(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &StringInterner,
) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => TokenKind::Int(
            slice
                .parse::<i64>()
                .map_err(|_| LexError::int_overflow(span))?,
        ),
        RawToken::Float => TokenKind::Float(
            slice
                .parse::<f64>()
                .map_err(|_| LexError::float_parse_error(span))?,
        ),
        RawToken::DoubleQuoted | RawToken::SingleQuoted => {
            let content = &slice[1..slice.len() - 1];
            let name = match unescape(content, span.start + 1)? {
                Some(unescaped) => interner.intern(&unescaped),
                None => interner.intern(content),
            };
            TokenKind::Str(name)
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::KwLt | RawToken::Lt => TokenKind::Lt,
        RawToken::KwLte | RawToken::LtEq => TokenKind::LtEq,
        RawToken::KwGt | RawToken::Gt => TokenKind::Gt,
        RawToken::KwGte | RawToken::GtEq => TokenKind::GtEq,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,

        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash | RawToken::SlashGt => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
    };
    Ok(kind)
}
