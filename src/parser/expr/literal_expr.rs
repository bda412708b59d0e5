//! Primary expressions and literals

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parse a primary expression: a literal, a list, a function literal,
    /// an inline template or a reference.
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let kind = match self.current_token() {
            Some(Token::Number(_)) => LiteralKind::Number,
            Some(Token::Charstring(_)) => LiteralKind::Charstring,
            Some(Token::Bitstring(_)) => LiteralKind::Bitstring,
            Some(Token::Hexstring(_)) => LiteralKind::Hexstring,
            Some(Token::Octetstring(_)) => LiteralKind::Octetstring,
            Some(Token::MalformedString(_)) => LiteralKind::Malformed,
            Some(Token::True) => LiteralKind::Boolean(true),
            Some(Token::False) => LiteralKind::Boolean(false),
            Some(Token::Null) => LiteralKind::Null,
            Some(Token::Omit) => LiteralKind::Omit,
            Some(Token::NoneKw) => LiteralKind::Verdict(Verdict::None),
            Some(Token::Pass) => LiteralKind::Verdict(Verdict::Pass),
            Some(Token::Inconc) => LiteralKind::Verdict(Verdict::Inconc),
            Some(Token::Fail) => LiteralKind::Verdict(Verdict::Fail),
            Some(Token::ErrorKw) => LiteralKind::Verdict(Verdict::Error),
            Some(Token::LeftParen) => return self.parse_template_values().map(Expression::TemplateValues),
            Some(Token::LeftBrace) => return self.parse_composite_literal(),
            Some(Token::Function) => return self.parse_function_literal(),
            Some(t) if starts_reference(t) => return self.parse_reference_expression(),
            _ => return Err(self.expected("expression")),
        };

        Ok(Expression::Literal(self.take_literal(kind)))
    }

    fn take_literal(&mut self, kind: LiteralKind) -> Literal {
        let (text, span) = match self.tokens.get(self.current) {
            Some(t) => (t.text.clone(), t.span.clone().into()),
            None => (String::new(), Span::dummy()),
        };
        self.advance();
        Literal { kind, text, span }
    }

    /// A reference, or an inline template `Type : value` built on it
    fn parse_reference_expression(&mut self) -> ParseResult<Expression> {
        let reference = self.parse_reference()?;
        if self.check(&Token::Colon) {
            self.advance();
            let value = self.parse_expression_internal()?;
            let span = reference.span().merge(value.span());
            return Ok(Expression::InlineTemplate(InlineTemplate {
                ty: Box::new(reference),
                value: Box::new(value),
                span,
            }));
        }
        Ok(Expression::Reference(reference))
    }
}

/// Tokens that can begin a reference
pub(crate) fn starts_reference(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::This
            | Token::SelfValue
            | Token::Unknown
            | Token::Any
            | Token::All
            | Token::Testcase
    )
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;
    use test_case::test_case;

    fn expr(source: &str) -> Expression {
        Parser::new(tokenize(source)).parse_expression().unwrap()
    }

    #[test_case("42", LiteralKind::Number ; "number")]
    #[test_case("1.5e3", LiteralKind::Number ; "exponent")]
    #[test_case("\"abc\"", LiteralKind::Charstring ; "charstring")]
    #[test_case("'0101'B", LiteralKind::Bitstring ; "bitstring")]
    #[test_case("'FF'H", LiteralKind::Hexstring ; "hexstring")]
    #[test_case("'00FF'O", LiteralKind::Octetstring ; "octetstring")]
    #[test_case("'123'x", LiteralKind::Malformed ; "malformed")]
    #[test_case("true", LiteralKind::Boolean(true) ; "boolean")]
    #[test_case("inconc", LiteralKind::Verdict(Verdict::Inconc) ; "verdict")]
    #[test_case("omit", LiteralKind::Omit ; "omit")]
    #[test_case("null", LiteralKind::Null ; "null")]
    fn test_literal_kinds(source: &str, kind: LiteralKind) {
        match expr(source) {
            Expression::Literal(l) => {
                assert_eq!(l.kind, kind);
                assert_eq!(l.text, source);
            }
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_template() {
        match expr("charstring : \"x\"") {
            Expression::InlineTemplate(t) => {
                assert_eq!(t.ty.as_name().map(|n| n.text.as_str()), Some("charstring"));
                assert!(matches!(*t.value, Expression::Literal(_)));
            }
            other => panic!("expected inline template, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_operand_is_an_error() {
        let mut parser = Parser::new(tokenize("1 +"));
        assert!(parser.parse_expression().is_err());
    }
}
