//! Lexer error types.

use std::fmt;

use quill_ir::Span;

/// A lexer error: where it happened and what went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Text logos could not match.
    InvalidToken,
    /// Integer literal does not fit in `i64`.
    IntOverflow,
    FloatParseError,
    /// Unknown escape in a string literal (e.g. `\q`).
    InvalidStringEscape { escape_char: char },
    /// `${` without its closing `}`.
    UnterminatedInterpolation,
    /// `<#name`, `</#name` or `<@` without its closing `>`.
    UnterminatedTag,
    /// `<#--` without `-->`.
    UnterminatedComment,
    /// `<#` or `</#` not followed by a directive name.
    MissingDirectiveName,
    /// Source longer than `u32::MAX` bytes.
    SourceTooLarge,
}

impl LexError {
    #[inline]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }

    #[cold]
    pub fn invalid_token(span: Span) -> Self {
        Self::new(LexErrorKind::InvalidToken, span)
    }

    #[cold]
    pub fn int_overflow(span: Span) -> Self {
        Self::new(LexErrorKind::IntOverflow, span)
    }

    #[cold]
    pub fn float_parse_error(span: Span) -> Self {
        Self::new(LexErrorKind::FloatParseError, span)
    }

    #[cold]
    pub fn invalid_string_escape(span: Span, escape_char: char) -> Self {
        Self::new(LexErrorKind::InvalidStringEscape { escape_char }, span)
    }

    #[cold]
    pub fn unterminated_interpolation(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedInterpolation, span)
    }

    #[cold]
    pub fn unterminated_tag(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedTag, span)
    }

    #[cold]
    pub fn unterminated_comment(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedComment, span)
    }

    #[cold]
    pub fn missing_directive_name(span: Span) -> Self {
        Self::new(LexErrorKind::MissingDirectiveName, span)
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidToken => write!(f, "unrecognized input"),
            LexErrorKind::IntOverflow => write!(f, "integer literal is too large"),
            LexErrorKind::FloatParseError => write!(f, "malformed float literal"),
            LexErrorKind::InvalidStringEscape { escape_char } => {
                write!(f, "unknown escape `\\{escape_char}` in string literal")
            }
            LexErrorKind::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation: missing `}}`")
            }
            LexErrorKind::UnterminatedTag => write!(f, "unterminated tag: missing `>`"),
            LexErrorKind::UnterminatedComment => {
                write!(f, "unterminated comment: missing `-->`")
            }
            LexErrorKind::MissingDirectiveName => write!(f, "expected a directive name"),
            LexErrorKind::SourceTooLarge => {
                write!(f, "template source exceeds {} bytes", u32::MAX)
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
