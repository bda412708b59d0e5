//! Lexical analysis for TTCN-3.
//!
//! The lexer turns source text into a lossless stream of positioned tokens.
//! Whitespace and comments are emitted as trivia tokens, so concatenating
//! the `text` of every token reproduces the input exactly.

mod lexer;
pub mod literal_parser;
mod token;

pub use lexer::{format_tokens, lexical_errors, tokenize, Lexer, TokenWithPosition};
pub use token::Token;

/// 1-based line and column of a token start
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
