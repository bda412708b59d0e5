//! Binary expressions by precedence climbing

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::precedence::LOWEST;
use crate::parser::{ParseResult, Parser};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Parse a complete expression
    pub(crate) fn parse_expression_internal(&mut self) -> ParseResult<Expression> {
        self.parse_expression_bp(LOWEST)
    }

    /// Parse an expression whose binary operators all bind at `min_level`
    /// or tighter.
    ///
    /// Binary operators are left-associative, so the right operand is parsed
    /// one level above the operator's own.
    pub(crate) fn parse_expression_bp(&mut self, min_level: u8) -> ParseResult<Expression> {
        ensure_sufficient_stack(|| self.parse_expression_bp_inner(min_level))
    }

    fn parse_expression_bp_inner(&mut self, min_level: u8) -> ParseResult<Expression> {
        let mut left = self.parse_prefix_expression()?;

        while let Some((op, width)) = self.peek_binary_operator() {
            let level = op.precedence();
            if level < min_level {
                break;
            }
            // `=>` only applies to a reference
            if op == BinaryOp::Arrow && !matches!(left, Expression::Reference(_)) {
                break;
            }
            self.current += width;

            let right = self.parse_expression_bp(level + 1)?;
            let span = left.span().merge(right.span());
            left = Expression::Binary(BinaryExpr {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            });
        }

        Ok(left)
    }

    /// The binary operator at the cursor and how many tokens it spans.
    /// `<<` and `>>` are two adjacent `<` or `>` tokens.
    pub(crate) fn peek_binary_operator(&self) -> Option<(BinaryOp, usize)> {
        if self.adjacent_pair(&Token::Less, &Token::Less) {
            return Some((BinaryOp::ShiftLeft, 2));
        }
        if self.adjacent_pair(&Token::Greater, &Token::Greater) {
            return Some((BinaryOp::ShiftRight, 2));
        }
        let op = match self.current_token()? {
            Token::FatArrow => BinaryOp::Arrow,
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Mod => BinaryOp::Mod,
            Token::Rem => BinaryOp::Rem,
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Ampersand => BinaryOp::Concat,
            Token::And4b => BinaryOp::And4b,
            Token::Xor4b => BinaryOp::Xor4b,
            Token::Or4b => BinaryOp::Or4b,
            Token::RotateLeft => BinaryOp::RotateLeft,
            Token::RotateRight => BinaryOp::RotateRight,
            Token::Less => BinaryOp::Less,
            Token::Greater => BinaryOp::Greater,
            Token::LessEqual => BinaryOp::LessEqual,
            Token::GreaterEqual => BinaryOp::GreaterEqual,
            Token::Equal => BinaryOp::Equal,
            Token::NotEqual => BinaryOp::NotEqual,
            Token::And => BinaryOp::And,
            Token::Xor => BinaryOp::Xor,
            Token::Or => BinaryOp::Or,
            _ => return None,
        };
        Some((op, 1))
    }
}
