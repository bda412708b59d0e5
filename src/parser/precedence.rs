//! Operator precedence table
//!
//! Higher levels bind tighter. The table is immutable and shared by every
//! parser instance.

use crate::ast::{BinaryOp, UnaryOp};

pub const PRIMARY: u8 = 150;
pub const UNARY: u8 = 145;
pub const MULTIPLICATIVE: u8 = 140;
pub const ADDITIVE: u8 = 130;
pub const BITWISE_NOT: u8 = 120;
pub const BITWISE_AND: u8 = 110;
pub const BITWISE_XOR: u8 = 100;
pub const BITWISE_OR: u8 = 90;
pub const SHIFT: u8 = 80;
pub const RELATIONAL: u8 = 70;
pub const EQUALITY: u8 = 60;
pub const LOGICAL_NOT: u8 = 50;
pub const LOGICAL_AND: u8 = 40;
pub const LOGICAL_XOR: u8 = 30;
pub const LOGICAL_OR: u8 = 20;

/// Floor used for a complete expression
pub const LOWEST: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub level: u8,
    pub associativity: Associativity,
}

const fn binary(op: BinaryOp, level: u8) -> OperatorInfo {
    OperatorInfo {
        operator: Operator::Binary(op),
        level,
        associativity: Associativity::Left,
    }
}

const fn prefix(op: UnaryOp, level: u8) -> OperatorInfo {
    OperatorInfo {
        operator: Operator::Unary(op),
        level,
        associativity: Associativity::Right,
    }
}

pub static OPERATORS: &[OperatorInfo] = &[
    binary(BinaryOp::Arrow, PRIMARY),
    prefix(UnaryOp::Plus, UNARY),
    prefix(UnaryOp::Minus, UNARY),
    prefix(UnaryOp::Bang, UNARY),
    prefix(UnaryOp::Increment, UNARY),
    prefix(UnaryOp::Decrement, UNARY),
    binary(BinaryOp::Mul, MULTIPLICATIVE),
    binary(BinaryOp::Div, MULTIPLICATIVE),
    binary(BinaryOp::Mod, MULTIPLICATIVE),
    binary(BinaryOp::Rem, MULTIPLICATIVE),
    binary(BinaryOp::Add, ADDITIVE),
    binary(BinaryOp::Sub, ADDITIVE),
    binary(BinaryOp::Concat, ADDITIVE),
    prefix(UnaryOp::Not4b, BITWISE_NOT),
    binary(BinaryOp::And4b, BITWISE_AND),
    binary(BinaryOp::Xor4b, BITWISE_XOR),
    binary(BinaryOp::Or4b, BITWISE_OR),
    binary(BinaryOp::ShiftLeft, SHIFT),
    binary(BinaryOp::ShiftRight, SHIFT),
    binary(BinaryOp::RotateLeft, SHIFT),
    binary(BinaryOp::RotateRight, SHIFT),
    binary(BinaryOp::Less, RELATIONAL),
    binary(BinaryOp::Greater, RELATIONAL),
    binary(BinaryOp::LessEqual, RELATIONAL),
    binary(BinaryOp::GreaterEqual, RELATIONAL),
    binary(BinaryOp::Equal, EQUALITY),
    binary(BinaryOp::NotEqual, EQUALITY),
    prefix(UnaryOp::Not, LOGICAL_NOT),
    binary(BinaryOp::And, LOGICAL_AND),
    binary(BinaryOp::Xor, LOGICAL_XOR),
    binary(BinaryOp::Or, LOGICAL_OR),
];

pub fn lookup(operator: Operator) -> Option<&'static OperatorInfo> {
    OPERATORS.iter().find(|info| info.operator == operator)
}

impl BinaryOp {
    pub fn precedence(&self) -> u8 {
        lookup(Operator::Binary(*self))
            .map(|info| info.level)
            .unwrap_or(PRIMARY)
    }
}

impl UnaryOp {
    pub fn precedence(&self) -> u8 {
        lookup(Operator::Unary(*self))
            .map(|info| info.level)
            .unwrap_or(UNARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_has_one_entry() {
        let binaries = [
            BinaryOp::Arrow,
            BinaryOp::Mul,
            BinaryOp::Div,
            BinaryOp::Mod,
            BinaryOp::Rem,
            BinaryOp::Add,
            BinaryOp::Sub,
            BinaryOp::Concat,
            BinaryOp::And4b,
            BinaryOp::Xor4b,
            BinaryOp::Or4b,
            BinaryOp::ShiftLeft,
            BinaryOp::ShiftRight,
            BinaryOp::RotateLeft,
            BinaryOp::RotateRight,
            BinaryOp::Less,
            BinaryOp::Greater,
            BinaryOp::LessEqual,
            BinaryOp::GreaterEqual,
            BinaryOp::Equal,
            BinaryOp::NotEqual,
            BinaryOp::And,
            BinaryOp::Xor,
            BinaryOp::Or,
        ];
        for op in binaries {
            let count = OPERATORS
                .iter()
                .filter(|i| i.operator == Operator::Binary(op))
                .count();
            assert_eq!(count, 1, "{:?}", op);
        }
        assert_eq!(OPERATORS.len(), binaries.len() + 7);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > UnaryOp::Not4b.precedence());
        assert!(BinaryOp::Equal.precedence() > UnaryOp::Not.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Xor.precedence());
        assert!(BinaryOp::Xor.precedence() > BinaryOp::Or.precedence());
        assert_eq!(UnaryOp::Minus.precedence(), UNARY);
    }

    #[test]
    fn unary_operators_are_right_associative() {
        assert!(OPERATORS
            .iter()
            .filter(|i| matches!(i.operator, Operator::Unary(_)))
            .all(|i| i.associativity == Associativity::Right));
    }
}
