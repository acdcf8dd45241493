//! Expression parsing.
//!
//! Binary operators use precedence climbing over `BinaryOp::precedence`
//! (lower number binds tighter), all left associative. Below them sit
//! unary operators, then postfix `.field` and `(args)`, then primaries.

use quill_ir::{ArgumentList, BinaryOp, Expr, ExprKind, Name, Span, UnaryOp};
use quill_lexer::{Token, TokenKind};
use quill_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::ParseError;

/// Loosest binding level (`||`).
const LOWEST: u8 = BinaryOp::Or.precedence();

/// Parse one expression, leaving any following tokens unconsumed.
pub(crate) fn parse_expr(c: &mut Cursor<'_>) -> Result<Expr, ParseError> {
    ensure_sufficient_stack(|| parse_binary(c, LOWEST))
}

fn parse_binary(c: &mut Cursor<'_>, max_precedence: u8) -> Result<Expr, ParseError> {
    let mut left = parse_unary(c)?;
    while let Some(op) = c.peek_kind().and_then(match_binary_op) {
        if op.precedence() > max_precedence {
            break;
        }
        c.advance();
        let right = parse_binary(c, op.precedence() - 1)?;
        let span = left.span.merge(right.span);
        left = Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        );
    }
    Ok(left)
}

fn match_binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

fn parse_unary(c: &mut Cursor<'_>) -> Result<Expr, ParseError> {
    let op = match c.peek_kind() {
        Some(TokenKind::Bang) => UnaryOp::Not,
        Some(TokenKind::Minus) => UnaryOp::Neg,
        _ => return parse_postfix(c),
    };
    let start = c.advance().map_or(Span::DUMMY, |t| t.span);
    let operand = ensure_sufficient_stack(|| parse_unary(c))?;
    let span = start.merge(operand.span);
    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}

fn parse_postfix(c: &mut Cursor<'_>) -> Result<Expr, ParseError> {
    let mut expr = parse_primary(c)?;
    loop {
        if c.eat(TokenKind::Dot).is_some() {
            let (field, field_span) = c.expect_ident("field name after `.`")?;
            let span = expr.span.merge(field_span);
            expr = Expr::new(
                ExprKind::Dot {
                    target: Box::new(expr),
                    field,
                },
                span,
            );
        } else if c.eat(TokenKind::LParen).is_some() {
            let (args, close) = parse_comma_list(c, TokenKind::RParen, "`,` or `)`")?;
            trace!(args = args.len(), "call");
            let span = expr.span.merge(close);
            expr = Expr::call(expr, args, span);
        } else {
            return Ok(expr);
        }
    }
}

fn parse_primary(c: &mut Cursor<'_>) -> Result<Expr, ParseError> {
    let Some(&Token { kind, span }) = c.advance() else {
        return Err(ParseError::unexpected_end("an expression", c.end_span()));
    };
    let kind = match kind {
        TokenKind::Int(value) => ExprKind::Int(value),
        TokenKind::Float(value) => ExprKind::Float(value),
        TokenKind::Str(name) => ExprKind::Str(name),
        TokenKind::True => ExprKind::Bool(true),
        TokenKind::False => ExprKind::Bool(false),
        TokenKind::Ident(name) => ExprKind::Ident(name),
        TokenKind::LParen => {
            let inner = parse_expr(c)?;
            let close = c.expect(TokenKind::RParen, "`)`")?;
            return Ok(Expr::new(
                ExprKind::Paren(Box::new(inner)),
                span.merge(close.span),
            ));
        }
        TokenKind::LBracket => {
            let (items, close) = parse_comma_list(c, TokenKind::RBracket, "`,` or `]`")?;
            return Ok(Expr::new(ExprKind::List(items), span.merge(close)));
        }
        other => return Err(ParseError::unexpected_token("an expression", other, span)),
    };
    Ok(Expr::new(kind, span))
}

/// Parse `a, b, c` up to and including `close`. Returns the items and the
/// span of the closing token.
fn parse_comma_list(
    c: &mut Cursor<'_>,
    close: TokenKind,
    expected: &'static str,
) -> Result<(ArgumentList, Span), ParseError> {
    let mut items = Vec::new();
    if let Some(token) = c.eat(close) {
        return Ok((ArgumentList::new(items), token.span));
    }
    loop {
        items.push(parse_expr(c)?);
        if c.eat(TokenKind::Comma).is_some() {
            continue;
        }
        let token = c.expect(close, expected)?;
        return Ok((ArgumentList::new(items), token.span));
    }
}

/// Target of a user-directive call: `name` or `ns.name`.
///
/// Calls and operators are not allowed here so that `<@m -1/>` passes `-1`
/// as an argument instead of computing `m - 1`.
pub(crate) fn parse_directive_target(c: &mut Cursor<'_>) -> Result<Expr, ParseError> {
    let (name, span) = c.expect_ident("a macro name")?;
    let mut target = Expr::new(ExprKind::Ident(name), span);
    while c.eat(TokenKind::Dot).is_some() {
        let (field, field_span) = c.expect_ident("field name after `.`")?;
        let span = target.span.merge(field_span);
        target = Expr::new(
            ExprKind::Dot {
                target: Box::new(target),
                field,
            },
            span,
        );
    }
    Ok(target)
}

/// `name = value` pairs, optionally comma separated, up to the end of input.
pub(crate) fn parse_named_args(c: &mut Cursor<'_>) -> Result<Vec<(Name, Expr)>, ParseError> {
    let mut args = Vec::new();
    while !c.is_at_end() {
        let (name, _) = c.expect_ident("an argument name")?;
        c.expect(TokenKind::Eq, "`=`")?;
        args.push((name, parse_expr(c)?));
        c.eat(TokenKind::Comma);
    }
    Ok(args)
}

/// Comma separated expressions up to the end of input.
pub(crate) fn parse_positional_args(c: &mut Cursor<'_>) -> Result<ArgumentList, ParseError> {
    let mut items = Vec::new();
    if c.is_at_end() {
        return Ok(ArgumentList::new(items));
    }
    loop {
        items.push(parse_expr(c)?);
        if c.eat(TokenKind::Comma).is_none() {
            c.expect_end("`,` or the end of the tag")?;
            return Ok(ArgumentList::new(items));
        }
    }
}
