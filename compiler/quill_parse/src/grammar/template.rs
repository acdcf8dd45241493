//! Template structure: turns scanned segments into elements.
//!
//! Definitions cannot nest, so the only open block is at most one
//! `#macro`/`#function` whose body collects elements until its end tag.

use std::sync::Arc;

use quill_ir::{
    AssignScope, CallableKind, DirectiveArgs, Element, ElementKind, MacroDef, Name, Param, Span,
    StringInterner,
};
use quill_lexer::{Segment, SegmentKind, Token, TokenKind};
use tracing::trace;

use super::expr::{parse_directive_target, parse_expr, parse_named_args, parse_positional_args};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::ParsedTemplate;

struct OpenDefinition {
    name: Name,
    kind: CallableKind,
    params: Vec<Param>,
    body: Vec<Element>,
    start: Span,
}

pub(crate) struct TemplateParser<'a> {
    interner: &'a StringInterner,
    root: Vec<Element>,
    open: Option<OpenDefinition>,
    macros: Vec<Arc<MacroDef>>,
}

impl<'a> TemplateParser<'a> {
    pub(crate) fn new(interner: &'a StringInterner) -> Self {
        TemplateParser {
            interner,
            root: Vec::new(),
            open: None,
            macros: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self, segments: Vec<Segment>) -> Result<ParsedTemplate, ParseError> {
        for segment in segments {
            self.segment(segment)?;
        }
        if let Some(open) = self.open {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDefinition {
                    name: open.kind.keyword().to_string(),
                },
                open.start,
            ));
        }
        Ok(ParsedTemplate {
            elements: self.root,
            macros: self.macros,
        })
    }

    fn push(&mut self, element: Element) {
        match &mut self.open {
            Some(open) => open.body.push(element),
            None => self.root.push(element),
        }
    }

    fn segment(&mut self, segment: Segment) -> Result<(), ParseError> {
        let span = segment.span;
        match segment.kind {
            SegmentKind::Text(text) => self.push(Element::new(ElementKind::Text(text), span)),
            SegmentKind::Interpolation(tokens) => {
                let mut c = Cursor::new(&tokens, tag_end(span, 1));
                let expr = parse_expr(&mut c)?;
                c.expect_end("`}`")?;
                self.push(Element::new(ElementKind::Interpolation(expr), span));
            }
            SegmentKind::Directive { name, tokens, .. } => self.directive(name, &tokens, span)?,
            SegmentKind::DirectiveEnd(name) => self.end_tag(name, span)?,
            SegmentKind::UserCall {
                tokens,
                self_closing,
            } => {
                if !self_closing {
                    return Err(ParseError::new(
                        ParseErrorKind::UserCallNotSelfClosing,
                        span,
                    ));
                }
                let element = user_call(&tokens, span)?;
                self.push(element);
            }
        }
        Ok(())
    }

    fn directive(&mut self, name: Name, tokens: &[Token], span: Span) -> Result<(), ParseError> {
        let mut c = Cursor::new(tokens, tag_end(span, 1));
        match self.interner.lookup(name) {
            "assign" => self.assignment(AssignScope::Namespace, &mut c, span),
            "global" => self.assignment(AssignScope::Global, &mut c, span),
            "local" => {
                if self.open.is_none() {
                    return Err(ParseError::new(ParseErrorKind::LocalOutsideCallable, span));
                }
                self.assignment(AssignScope::Local, &mut c, span)
            }
            "macro" => self.open_definition(CallableKind::Macro, &mut c, span),
            "function" => self.open_definition(CallableKind::Function, &mut c, span),
            "return" => {
                let value = if c.is_at_end() {
                    None
                } else {
                    let in_function = self
                        .open
                        .as_ref()
                        .is_some_and(|open| open.kind == CallableKind::Function);
                    if !in_function {
                        return Err(ParseError::new(
                            ParseErrorKind::ReturnValueOutsideFunction,
                            span,
                        ));
                    }
                    let value = parse_expr(&mut c)?;
                    c.expect_end("the end of the tag")?;
                    Some(value)
                };
                self.push(Element::new(ElementKind::Return(value), span));
                Ok(())
            }
            other => Err(ParseError::new(
                ParseErrorKind::UnknownDirective {
                    name: other.to_string(),
                },
                span,
            )),
        }
    }

    fn assignment(
        &mut self,
        scope: AssignScope,
        c: &mut Cursor<'_>,
        span: Span,
    ) -> Result<(), ParseError> {
        let (name, _) = c.expect_ident("a variable name")?;
        c.expect(TokenKind::Eq, "`=`")?;
        let value = parse_expr(c)?;
        c.expect_end("the end of the tag")?;
        self.push(Element::new(ElementKind::Assign { scope, name, value }, span));
        Ok(())
    }

    fn open_definition(
        &mut self,
        kind: CallableKind,
        c: &mut Cursor<'_>,
        span: Span,
    ) -> Result<(), ParseError> {
        if self.open.is_some() {
            return Err(ParseError::new(ParseErrorKind::NestedDefinition, span));
        }
        let (name, _) = c.expect_ident("a macro name")?;
        let mut params: Vec<Param> = Vec::new();
        while !c.is_at_end() {
            let (param, param_span) = c.expect_ident("a parameter name")?;
            if params.iter().any(|p| p.name == param) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateParameter {
                        name: self.interner.lookup(param).to_string(),
                    },
                    param_span,
                ));
            }
            let default = if c.eat(TokenKind::Eq).is_some() {
                Some(parse_expr(c)?)
            } else {
                None
            };
            params.push(Param {
                name: param,
                default,
            });
            c.eat(TokenKind::Comma);
        }
        trace!(
            name = self.interner.lookup(name),
            params = params.len(),
            "definition opened"
        );
        self.open = Some(OpenDefinition {
            name,
            kind,
            params,
            body: Vec::new(),
            start: span,
        });
        Ok(())
    }

    fn end_tag(&mut self, name: Name, span: Span) -> Result<(), ParseError> {
        let keyword = self.interner.lookup(name);
        let matches = self
            .open
            .as_ref()
            .is_some_and(|open| open.kind.keyword() == keyword);
        let open = match self.open.take() {
            Some(open) if matches => open,
            other => {
                self.open = other;
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEndTag {
                        name: keyword.to_string(),
                    },
                    span,
                ));
            }
        };
        let def = Arc::new(MacroDef {
            name: open.name,
            kind: open.kind,
            params: open.params,
            body: open.body,
            span: open.start.merge(span),
        });
        self.macros.push(Arc::clone(&def));
        let element_span = def.span;
        self.root
            .push(Element::new(ElementKind::MacroDef(def), element_span));
        Ok(())
    }
}

fn user_call(tokens: &[Token], span: Span) -> Result<Element, ParseError> {
    let mut c = Cursor::new(tokens, tag_end(span, 2));
    let target = parse_directive_target(&mut c)?;
    let named = matches!(
        (c.peek_kind(), c.peek_nth_kind(1)),
        (Some(TokenKind::Ident(_)), Some(TokenKind::Eq))
    );
    let args = if named {
        DirectiveArgs::Named(parse_named_args(&mut c)?)
    } else {
        DirectiveArgs::Positional(parse_positional_args(&mut c)?)
    };
    Ok(Element::new(ElementKind::UserCall { target, args }, span))
}

/// Span of the closing delimiter of a tag, `width` bytes wide.
fn tag_end(span: Span, width: u32) -> Span {
    Span::new(span.end.saturating_sub(width), span.end)
}
