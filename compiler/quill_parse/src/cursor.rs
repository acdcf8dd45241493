//! Token cursor over one lexed region (an interpolation, a tag, or a
//! standalone expression).

use quill_ir::{Name, Span};
use quill_lexer::{Token, TokenKind};

use crate::error::ParseError;

pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Where the region ends, for "found end of input" errors.
    end: Span,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token], end: Span) -> Self {
        Cursor {
            tokens,
            pos: 0,
            end,
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    #[inline]
    pub(crate) fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consume `kind` if it is next.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::unexpected_token(expected, token.kind, token.span)),
            None => Err(ParseError::unexpected_end(expected, self.end)),
        }
    }

    pub(crate) fn expect_ident(&mut self, expected: &'static str) -> Result<(Name, Span), ParseError> {
        match self.peek() {
            Some(&Token {
                kind: TokenKind::Ident(name),
                span,
            }) => {
                self.pos += 1;
                Ok((name, span))
            }
            Some(token) => Err(ParseError::unexpected_token(expected, token.kind, token.span)),
            None => Err(ParseError::unexpected_end(expected, self.end)),
        }
    }

    /// Fail unless every token has been consumed.
    pub(crate) fn expect_end(&self, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) => Err(ParseError::unexpected_token(expected, token.kind, token.span)),
            None => Ok(()),
        }
    }

    pub(crate) fn end_span(&self) -> Span {
        self.end
    }
}
