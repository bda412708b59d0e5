//! TTCN-3 lexer and syntax tree parser
//!
//! This library turns TTCN-3 source text into a typed concrete syntax tree
//! and reports lexical and syntax diagnostics without stopping at the first
//! error.

pub mod ast;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
mod stack;

// Re-export commonly used types
pub use ast::{Definition, Expression, SourceFile, Statement};
pub use driver::{parse_file, parse_source, ParseOutput};
pub use error::{ErrorCollector, TtcnError, TtcnResult};
pub use lexer::{tokenize, Lexer, Token, TokenWithPosition};
pub use parser::{ParseError, ParseResult, Parser};
pub use printer::render;
