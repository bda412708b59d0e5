//! `with { ... }` attribute blocks

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// Trailing `with { attribute; ... }`, if present
    pub(super) fn parse_with_attributes(&mut self) -> ParseResult<Option<WithAttributes>> {
        if !self.check(&Token::With) {
            return Ok(None);
        }
        let start = self.current_span().start;
        self.advance();
        self.expect(Token::LeftBrace)?;

        let mut attributes = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            attributes.push(self.parse_attribute()?);
            self.match_token(&Token::Semicolon);
        }
        self.expect(Token::RightBrace)?;

        Ok(Some(WithAttributes {
            attributes,
            span: self.span_from(start),
        }))
    }

    /// `kind [override | @local] [(specifiers)] [{encodings}] "value"`
    fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        let start = self.current_span().start;
        let kind = match self.current_token() {
            Some(Token::Identifier(word)) => AttributeKind::from_word(word),
            _ => None,
        }
        .ok_or_else(|| self.expected("attribute kind"))?;
        self.advance();

        let modifier = if self.match_word("override") {
            Some(AttributeModifier::Override)
        } else if self.match_modifier("@local") {
            Some(AttributeModifier::Local)
        } else {
            None
        };

        let specifiers = if self.match_token(&Token::LeftParen) {
            let mut specifiers = vec![self.parse_attribute_specifier()?];
            while self.match_token(&Token::Comma) {
                if self.check(&Token::RightParen) {
                    break;
                }
                specifiers.push(self.parse_attribute_specifier()?);
            }
            self.expect(Token::RightParen)?;
            Some(specifiers)
        } else {
            None
        };

        let encodings = if self.match_token(&Token::LeftBrace) {
            let mut encodings = vec![self.expect_charstring()?];
            while self.match_token(&Token::Comma) {
                if self.check(&Token::RightBrace) {
                    break;
                }
                encodings.push(self.expect_charstring()?);
            }
            self.expect(Token::RightBrace)?;
            Some(encodings)
        } else {
            None
        };

        let value = self.expect_charstring()?;

        Ok(Attribute {
            kind,
            modifier,
            specifiers,
            encodings,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_attribute_specifier(&mut self) -> ParseResult<AttributeSpecifier> {
        let reference = self.parse_reference()?;
        let except = if self.match_token(&Token::Except) {
            self.expect(Token::LeftBrace)?;
            let references = self.parse_references()?;
            self.expect(Token::RightBrace)?;
            Some(references)
        } else {
            None
        };
        Ok(AttributeSpecifier { reference, except })
    }
}
