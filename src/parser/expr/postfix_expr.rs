//! References and their postfix chains
//!
//! Selection, indexing and calls extend a reference from the left, so
//! `a.b[0](x)` nests as `Call(Index(Selector(a, b), 0), x)`.

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

use super::literal_expr::starts_reference;

impl Parser {
    /// Parse a reference with its full postfix chain
    pub(crate) fn parse_reference(&mut self) -> ParseResult<Reference> {
        let mut reference = self.parse_reference_root()?;

        loop {
            let start = reference.span().start;
            match self.current_token() {
                Some(Token::Dot) => {
                    self.advance();
                    let field = self.parse_selector_field()?;
                    reference = Reference::Selector {
                        operand: Box::new(reference),
                        field: Box::new(field),
                        span: self.span_from(start),
                    };
                }
                Some(Token::LeftBracket) => {
                    if self.alt_guard_mode && self.bracket_opens_guard() {
                        break;
                    }
                    self.advance();
                    let indices = self.without_guard_mode(|p| p.parse_expression_list(&Token::RightBracket))?;
                    self.expect(Token::RightBracket)?;
                    reference = Reference::Index {
                        operand: Box::new(reference),
                        indices,
                        span: self.span_from(start),
                    };
                }
                Some(Token::LeftParen) => {
                    self.advance();
                    let (arguments, variadic) = self.without_guard_mode(|p| p.parse_call_arguments())?;
                    reference = Reference::Call {
                        function: Box::new(reference),
                        arguments,
                        variadic,
                        span: self.span_from(start),
                    };
                }
                _ => break,
            }
        }

        Ok(reference)
    }

    /// Run `f` with alt-guard bracket handling switched off, for brackets
    /// nested inside a communication reference.
    pub(crate) fn without_guard_mode<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.alt_guard_mode, false);
        let result = f(self);
        self.alt_guard_mode = saved;
        result
    }

    /// `ref, ref, ...` with an optional trailing comma
    pub(crate) fn parse_references(&mut self) -> ParseResult<Vec<Reference>> {
        let mut references = vec![self.parse_reference()?];
        while self.match_token(&Token::Comma) {
            if !self.current_token().map(starts_reference).unwrap_or(false) {
                break;
            }
            references.push(self.parse_reference()?);
        }
        Ok(references)
    }

    /// Comma separated expressions up to (not including) `close`. A trailing
    /// comma is accepted.
    pub(crate) fn parse_expression_list(&mut self, close: &Token) -> ParseResult<Vec<Expression>> {
        let mut items = Vec::new();
        while !self.check(close) && !self.is_at_end() {
            items.push(self.parse_expression_internal()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Arguments after `(`, through the closing `)`
    fn parse_call_arguments(&mut self) -> ParseResult<(Vec<Expression>, bool)> {
        let mut arguments = Vec::new();
        while !self.check(&Token::RightParen) && !self.check(&Token::Ellipsis) {
            arguments.push(self.parse_expression_internal()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        let variadic = self.match_token(&Token::Ellipsis);
        self.expect(Token::RightParen)?;
        Ok((arguments, variadic))
    }

    /// After `.`, keywords other than the reference keywords are field
    /// names (`p.catch`).
    fn parse_selector_field(&mut self) -> ParseResult<Reference> {
        match self.tokens.get(self.current) {
            Some(t) if t.token.is_keyword() && !starts_reference(&t.token) => {
                let name = Name::new(t.text.clone(), t.span.clone().into());
                self.advance();
                Ok(Reference::Name(name))
            }
            _ => self.parse_reference_root(),
        }
    }

    /// The head of a reference: an identifier (possibly instantiated with
    /// type arguments) or one of the keyword references.
    fn parse_reference_root(&mut self) -> ParseResult<Reference> {
        let start = self.current_span().start;
        let keyword = match self.current_token() {
            Some(Token::Identifier(_)) => return self.parse_identifier_reference(),
            Some(Token::This) => ReferenceKeyword::This,
            Some(Token::SelfValue) => ReferenceKeyword::SelfRef,
            Some(Token::Unknown) => ReferenceKeyword::Unknown,
            Some(Token::Testcase) => ReferenceKeyword::Testcase,
            Some(Token::Any) | Some(Token::All) => return self.parse_quantified_reference(),
            _ => return Err(self.expected("reference")),
        };
        self.advance();
        Ok(Reference::Keyword {
            keyword,
            span: self.span_from(start),
        })
    }

    fn parse_identifier_reference(&mut self) -> ParseResult<Reference> {
        let name = self.expect_identifier()?;
        if self.check(&Token::Less) {
            let start = name.span.start;
            if let Some(arguments) = self.speculate(|p| p.parse_type_arguments()) {
                return Ok(Reference::TypeInstantiation {
                    name,
                    arguments,
                    span: self.span_from(start),
                });
            }
        }
        Ok(Reference::Name(name))
    }

    /// `< ref, ... >`; fails when the list does not close, leaving `<` to
    /// be read as a comparison.
    fn parse_type_arguments(&mut self) -> ParseResult<Vec<Reference>> {
        self.expect(Token::Less)?;
        let mut arguments = Vec::new();
        while !self.check(&Token::Greater) {
            arguments.push(self.parse_reference()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::Greater)?;
        Ok(arguments)
    }

    /// `any`/`all` followed by `port`, `timer`, `component` or `from name`
    fn parse_quantified_reference(&mut self) -> ParseResult<Reference> {
        let start = self.current_span().start;
        let quantifier = if self.match_token(&Token::Any) {
            Quantifier::Any
        } else {
            self.expect(Token::All)?;
            Quantifier::All
        };

        let keyword = match (quantifier, self.current_token()) {
            (Quantifier::All, Some(Token::Port)) => ReferenceKeyword::AllPort,
            (Quantifier::Any, Some(Token::Port)) => ReferenceKeyword::AnyPort,
            (Quantifier::All, Some(Token::Timer)) => ReferenceKeyword::AllTimer,
            (Quantifier::Any, Some(Token::Timer)) => ReferenceKeyword::AnyTimer,
            (Quantifier::All, Some(Token::Component)) => ReferenceKeyword::AllComponent,
            (Quantifier::Any, Some(Token::Component)) => ReferenceKeyword::AnyComponent,
            (_, Some(Token::From)) => {
                self.advance();
                let argument = self.expect_identifier()?;
                return Ok(Reference::FromCall {
                    quantifier,
                    argument,
                    span: self.span_from(start),
                });
            }
            _ => return Err(self.expected("`port`, `timer`, `component` or `from`")),
        };
        self.advance();
        Ok(Reference::Keyword {
            keyword,
            span: self.span_from(start),
        })
    }

    /// Inside an alt branch, whether the `[` at the cursor opens the next
    /// guard: `[]`, `[else]`, or a bracket whose matching `]` is followed by
    /// the start of a reference.
    fn bracket_opens_guard(&self) -> bool {
        match self.peek(1) {
            Some(Token::RightBracket) | Some(Token::Else) => return true,
            None => return false,
            _ => {}
        }
        let mut depth = 0usize;
        let mut offset = 0;
        while let Some(token) = self.peek(offset) {
            match token {
                Token::LeftBracket => depth += 1,
                Token::RightBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.peek(offset + 1).map(starts_reference).unwrap_or(false);
                    }
                }
                _ => {}
            }
            offset += 1;
        }
        false
    }
}
