//! Parse error types.

use std::fmt;

use quill_ir::{SourceFile, Span};
use quill_lexer::{LexError, LexErrorKind, TokenKind};

/// A parse error with the span it points at.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    Lex(LexErrorKind),
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    UnexpectedEnd {
        expected: &'static str,
    },
    UnknownDirective {
        name: String,
    },
    /// `</#name>` that closes nothing open.
    UnexpectedEndTag {
        name: String,
    },
    UnclosedDefinition {
        name: String,
    },
    NestedDefinition,
    DuplicateParameter {
        name: String,
    },
    /// `<#return value>` outside a `#function`.
    ReturnValueOutsideFunction,
    /// `<#local>` outside a macro or function body.
    LocalOutsideCallable,
    /// `<@m>` written without the closing `/`.
    UserCallNotSelfClosing,
}

impl ParseError {
    #[inline]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    #[cold]
    pub fn unexpected_token(expected: &'static str, found: TokenKind, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken { expected, found }, span)
    }

    #[cold]
    pub fn unexpected_end(expected: &'static str, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedEnd { expected }, span)
    }

    /// Render with file name, line, column and a source excerpt.
    pub fn render(&self, source: &SourceFile) -> String {
        format!("error: {}\n{}", self.kind, source.snippet(self.span))
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Lex(kind) => write!(f, "{kind}"),
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::UnexpectedEnd { expected } => {
                write!(f, "expected {expected}, found end of input")
            }
            ParseErrorKind::UnknownDirective { name } => write!(f, "unknown directive `#{name}`"),
            ParseErrorKind::UnexpectedEndTag { name } => {
                write!(f, "`</#{name}>` does not close an open directive")
            }
            ParseErrorKind::UnclosedDefinition { name } => {
                write!(f, "`<#{name}>` is never closed")
            }
            ParseErrorKind::NestedDefinition => {
                write!(f, "macros and functions cannot be defined inside one another")
            }
            ParseErrorKind::DuplicateParameter { name } => {
                write!(f, "parameter `{name}` is declared twice")
            }
            ParseErrorKind::ReturnValueOutsideFunction => {
                write!(f, "only a `#function` can return a value")
            }
            ParseErrorKind::LocalOutsideCallable => {
                write!(f, "`#local` is only allowed inside a macro or function")
            }
            ParseErrorKind::UserCallNotSelfClosing => {
                write!(f, "user directive calls must be self-closing: `<@name .../>`")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}
