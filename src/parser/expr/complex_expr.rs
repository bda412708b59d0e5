//! Value lists, composite literals and function literals

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// `( item, ... )`, at least one item
    pub(crate) fn parse_template_values(&mut self) -> ParseResult<ListExpr> {
        let start = self.current_span().start;
        self.expect(Token::LeftParen)?;
        let items = self.parse_list_items(&Token::RightParen, false)?;
        if items.is_empty() {
            return Err(self.expected("expression"));
        }
        self.expect(Token::RightParen)?;
        Ok(ListExpr {
            items,
            span: self.span_from(start),
        })
    }

    /// `{ item, ... }`; items may be field assignments `f := v`
    pub(crate) fn parse_composite_literal(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(Token::LeftBrace)?;
        let items = self.parse_list_items(&Token::RightBrace, true)?;
        self.expect(Token::RightBrace)?;
        Ok(Expression::Composite(ListExpr {
            items,
            span: self.span_from(start),
        }))
    }

    fn parse_list_items(&mut self, close: &Token, assignments: bool) -> ParseResult<Vec<Expression>> {
        let mut items = Vec::new();
        while !self.check(close) && !self.is_at_end() {
            items.push(self.parse_list_item(assignments)?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_list_item(&mut self, assignments: bool) -> ParseResult<Expression> {
        let item = self.parse_expression_internal()?;

        if self.match_token(&Token::DotDot) {
            let upper = self.parse_expression_internal()?;
            let span = item.span().merge(upper.span());
            return Ok(Expression::Range(RangeExpr {
                lower: Box::new(item),
                upper: Box::new(upper),
                span,
            }));
        }

        if assignments && self.check(&Token::Assign) {
            if let Expression::Reference(field) = item {
                self.advance();
                let value = self.parse_expression_internal()?;
                let span = field.span().merge(value.span());
                return Ok(Expression::FieldAssignment(FieldAssignment {
                    field,
                    value: Box::new(value),
                    span,
                }));
            }
            return Err(self.error("only a field reference can be assigned in a composite literal".to_string()));
        }

        Ok(item)
    }

    /// `function @mods (params) runs on C mtc M system S return T exception (E) { ... }`
    pub(crate) fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(Token::Function)?;
        let modifiers = self.parse_modifiers();
        let parameters = self.parse_parameters()?;
        let context = self.parse_execution_context()?;
        let return_type = self.parse_return_type()?;
        let exception = self.parse_exception_clause()?;
        let body = self.parse_block()?;
        Ok(Expression::FunctionLiteral(Box::new(FunctionLiteral {
            modifiers,
            parameters,
            context,
            return_type,
            exception,
            body,
            span: self.span_from(start),
        })))
    }
}
