//! Parser module
//!
//! Recursive descent over the filtered token stream, producing the typed
//! syntax tree in [`crate::ast`]. Expressions use precedence climbing over
//! the table in [`precedence`].
//!
//! Two places need more than one token of lookahead and are handled by
//! bounded speculation (see [`Parser`]):
//!
//! - the optional label or value after `break`, `continue` and `return`
//! - the optional type in `var`/`const` declaration heads
//!
//! ```ttcn3
//! module M {
//!     function f() {
//!         var integer x := 1;
//!         break
//!         g();
//!     }
//! }
//! ```

mod attr_parser;
mod decl_parser;
mod expr;
mod parser_impl;
pub mod precedence;
mod stmt_parser;
mod type_parser;

pub use parser_impl::Parser;

use crate::error::ParserError;
pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;
