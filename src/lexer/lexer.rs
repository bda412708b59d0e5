//! Positioned token stream

use logos::{Lexer as LogosLexer, Logos, Span};

use super::literal_parser::malformed_reason;
use super::token::Token;
use super::Position;
use crate::error::LexerError;

/// A token together with its byte span, start position and source text.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub span: Span,
    pub position: Position,
    pub text: String,
}

/// Lazy tokenizer over a source string.
///
/// Unrecognized characters produce [`Token::Error`] and lexing continues at
/// the next character, so the stream always covers the whole input.
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    input: &'a str,
    base: usize,
    position: Position,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::from_offset(input, 0)
    }

    /// Restart lexing at a byte offset. Offsets inside a multi-byte
    /// character are moved forward to the next character boundary.
    pub fn from_offset(input: &'a str, offset: usize) -> Self {
        let mut base = offset.min(input.len());
        while !input.is_char_boundary(base) {
            base += 1;
        }
        let mut position = Position::new();
        for ch in input[..base].chars() {
            position.advance(ch);
        }
        Self {
            inner: Token::lexer(&input[base..]),
            input,
            base,
            position,
            last_end: base,
        }
    }

    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = (local.start + self.base)..(local.end + self.base);

        for ch in self.input[self.last_end..span.start].chars() {
            self.position.advance(ch);
        }
        let position = self.position;
        let text = &self.input[span.clone()];
        for ch in text.chars() {
            self.position.advance(ch);
        }
        self.last_end = span.end;

        Some(TokenWithPosition {
            token: result.unwrap_or(Token::Error),
            text: text.to_owned(),
            span,
            position,
        })
    }
}

/// Tokenize a whole source string, trivia included.
pub fn tokenize(input: &str) -> Vec<TokenWithPosition> {
    Lexer::new(input).collect_tokens()
}

/// Lexical diagnostics found in a token stream, in source order.
pub fn lexical_errors(tokens: &[TokenWithPosition]) -> Vec<LexerError> {
    tokens
        .iter()
        .filter_map(|t| match &t.token {
            Token::Error => Some(LexerError::UnrecognizedCharacter {
                text: t.text.clone(),
                span: t.span.clone().into(),
            }),
            Token::MalformedString(raw) => Some(LexerError::MalformedLiteral {
                text: raw.clone(),
                reason: malformed_reason(raw),
                span: t.span.clone().into(),
            }),
            _ => None,
        })
        .collect()
}

/// Debug dump of a token stream, one token per line.
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .filter(|t| !t.token.is_trivia())
        .map(|t| {
            format!(
                "{}:{} {:?} {:?}",
                t.position.line, t.position.column, t.token, t.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .into_iter()
            .map(|t| t.token)
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test]
    fn test_keyword_boundary() {
        assert_eq!(
            kinds("forward for"),
            vec![Token::Identifier("forward".to_string()), Token::For]
        );
    }

    #[test]
    fn test_error_token_resynchronizes() {
        let tokens = tokenize("a = b");
        let errors: Vec<_> = tokens.iter().filter(|t| t.token == Token::Error).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "=");
        assert_eq!(tokens.last().map(|t| t.text.as_str()), Some("b"));
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("a\n  b");
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!(b.position, Position { line: 2, column: 3 });
    }

    #[test]
    fn test_restart_from_offset() {
        let source = "var x := 1;\nvar y := 2;";
        let offset = source.find("var y").unwrap();
        let tokens: Vec<_> = Lexer::from_offset(source, offset).collect();
        assert_eq!(tokens[0].token, Token::Var);
        assert_eq!(tokens[0].span.start, offset);
        assert_eq!(tokens[0].position, Position { line: 2, column: 1 });
    }

    #[test]
    fn test_lexical_errors_classified() {
        let tokens = tokenize("'123'x $");
        let errors = lexical_errors(&tokens);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], LexerError::MalformedLiteral { .. }));
        assert!(matches!(errors[1], LexerError::UnrecognizedCharacter { .. }));
    }
}
