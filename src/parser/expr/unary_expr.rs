//! Prefix operators

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parse a prefix-operator expression or fall through to a primary.
    ///
    /// The operand is parsed at the operator's own level, which nests
    /// repeated prefixes to the right: `- - a` is `-(-a)`.
    pub(crate) fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let op = match self.current_token() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => {
                if !self.peek(1).map(starts_operand).unwrap_or(false) {
                    return self.parse_not_used();
                }
                UnaryOp::Minus
            }
            Some(Token::Bang) => UnaryOp::Bang,
            Some(Token::PlusPlus) => UnaryOp::Increment,
            Some(Token::MinusMinus) => UnaryOp::Decrement,
            Some(Token::Not4b) => UnaryOp::Not4b,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };

        let start = self.current_span().start;
        self.advance();
        let operand = self.parse_expression_bp(op.precedence())?;
        Ok(Expression::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span: self.span_from(start),
        }))
    }

    /// A lone `-`
    fn parse_not_used(&mut self) -> ParseResult<Expression> {
        let span = self.current_span();
        self.advance();
        Ok(Expression::Literal(Literal {
            kind: LiteralKind::NotUsed,
            text: "-".to_string(),
            span: span.into(),
        }))
    }
}

/// Tokens that can begin an operand
pub(crate) fn starts_operand(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::Number(_)
            | Token::Charstring(_)
            | Token::Bitstring(_)
            | Token::Hexstring(_)
            | Token::Octetstring(_)
            | Token::MalformedString(_)
            | Token::True
            | Token::False
            | Token::Null
            | Token::Omit
            | Token::NoneKw
            | Token::Pass
            | Token::Inconc
            | Token::Fail
            | Token::ErrorKw
            | Token::LeftParen
            | Token::LeftBrace
            | Token::Function
            | Token::This
            | Token::SelfValue
            | Token::Unknown
            | Token::Any
            | Token::All
            | Token::Testcase
            | Token::Plus
            | Token::Minus
            | Token::Bang
            | Token::PlusPlus
            | Token::MinusMinus
            | Token::Not4b
            | Token::Not
    )
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn expr(source: &str) -> Expression {
        Parser::new(tokenize(source)).parse_expression().unwrap()
    }

    #[test]
    fn test_double_minus_nests_right() {
        match expr("- - a") {
            Expression::Unary(outer) => {
                assert_eq!(outer.op, UnaryOp::Minus);
                match *outer.operand {
                    Expression::Unary(inner) => {
                        assert_eq!(inner.op, UnaryOp::Minus);
                        assert!(matches!(*inner.operand, Expression::Reference(_)));
                    }
                    other => panic!("expected unary operand, got {:?}", other),
                }
            }
            other => panic!("expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_not_binds_looser_than_equality() {
        match expr("not a == b") {
            Expression::Unary(u) => {
                assert_eq!(u.op, UnaryOp::Not);
                assert!(matches!(*u.operand, Expression::Binary(_)));
            }
            other => panic!("expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_minus_binds_tighter_than_multiplication() {
        match expr("-a * b") {
            Expression::Binary(b) => {
                assert_eq!(b.op, BinaryOp::Mul);
                assert!(matches!(*b.left, Expression::Unary(_)));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_lone_minus_is_not_used() {
        match expr("-") {
            Expression::Literal(l) => assert_eq!(l.kind, LiteralKind::NotUsed),
            other => panic!("expected literal, got {:?}", other),
        }
    }
}
