//! Expression parsing
//!
//! Split by expression shape. `binary_expr` drives precedence climbing and
//! the other modules supply operands.

mod binary_expr;
mod complex_expr;
mod literal_expr;
mod postfix_expr;
mod unary_expr;

pub(crate) use literal_expr::starts_reference;
pub(crate) use unary_expr::starts_operand;
