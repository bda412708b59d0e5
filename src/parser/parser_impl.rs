//! Parser state, cursor helpers, speculation and error recovery

use log::{debug, trace};

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// Recursive-descent parser over a filtered token stream.
///
/// Trivia and unrecognized characters are removed up front (the driver
/// reports the latter). Syntax errors inside statement and definition lists
/// are recorded and replaced by [`ErrorNode`]s, so a parse always yields a
/// tree.
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
    pub(super) errors: Vec<ParseError>,
    /// Set while parsing the communication part of an alt branch, where a
    /// `[` may open the next guard instead of an index.
    pub(super) alt_guard_mode: bool,
    comments: Vec<Comment>,
    end: usize,
}

/// Cursor position plus diagnostic count, restored on rollback
#[derive(Debug, Clone, Copy)]
pub(super) struct Snapshot {
    current: usize,
    errors: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        let mut comments = Vec::new();
        let mut kept = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.token {
                Token::Comment => comments.push(Comment {
                    text: token.text,
                    span: token.span.into(),
                }),
                Token::Whitespace | Token::Error => {}
                _ => kept.push(token),
            }
        }
        Self {
            tokens: kept,
            current: 0,
            errors: Vec::new(),
            alt_guard_mode: false,
            comments,
            end,
        }
    }

    /// Parse a whole source unit.
    ///
    /// A unit starting with a definition keyword is a definition list,
    /// unless that list has errors and the whole unit reads as one expression
    /// (`testcase.stop`, a function literal). Anything else is tried as one
    /// bare expression that must reach the end of input. When that fails too,
    /// the diagnostic is recorded and the unit becomes a single error node.
    pub fn parse_source_file(&mut self) -> SourceFile {
        let span = Span::new(0, self.end);
        let root = if self.is_at_end() {
            SourceRoot::Definitions(Vec::new())
        } else if self.starts_definition() {
            self.parse_definitions_or_expression()
        } else {
            match self.speculate(|p| p.parse_complete_expression()) {
                Some(expr) => {
                    debug!("source unit parsed as a bare expression");
                    SourceRoot::Expression(expr)
                }
                None => {
                    let start = self.current;
                    if let Err(e) = self.parse_complete_expression() {
                        self.errors.push(e);
                    }
                    self.current = self.tokens.len();
                    let node = self.error_node(start, "expected a definition or an expression");
                    SourceRoot::Definitions(vec![Definition::Error(node)])
                }
            }
        };

        SourceFile {
            root,
            comments: std::mem::take(&mut self.comments),
            span,
        }
    }

    /// Parse a single expression (REPL and tests)
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_internal()
    }

    /// Parse a single statement
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.parse_statement_internal()
    }

    /// Parse a single definition
    pub fn parse_definition(&mut self) -> ParseResult<Definition> {
        self.parse_definition_internal()
    }

    /// Diagnostics recorded so far, in the order they were found
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    pub fn is_finished(&self) -> bool {
        self.is_at_end()
    }

    fn parse_definitions_or_expression(&mut self) -> SourceRoot {
        let start = self.snapshot();
        let definitions = self.parse_definition_list(false);
        if self.errors.len() == start.errors {
            return SourceRoot::Definitions(definitions);
        }

        let errors = self.errors.split_off(start.errors);
        let end = self.current;
        self.restore(start);
        match self.speculate(|p| p.parse_complete_expression()) {
            Some(expr) => {
                debug!("definition list failed, source unit parsed as a bare expression");
                SourceRoot::Expression(expr)
            }
            None => {
                self.errors.extend(errors);
                self.current = end;
                SourceRoot::Definitions(definitions)
            }
        }
    }

    fn parse_complete_expression(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression_internal()?;
        if !self.is_at_end() {
            return Err(self.expected("end of input"));
        }
        Ok(expr)
    }

    // ==================== cursor ====================

    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    pub(super) fn current_span(&self) -> logos::Span {
        self.tokens
            .get(self.current)
            .map(|t| t.span.clone())
            .unwrap_or(self.end..self.end)
    }

    /// Span from `start` to the end of the previously consumed token
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start)
        } else {
            start
        };
        Span::new(start, end.max(start))
    }

    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Compare token kinds, ignoring payloads
    pub(super) fn check(&self, token_type: &Token) -> bool {
        self.peek_is(0, token_type)
    }

    pub(super) fn peek_is(&self, offset: usize, token_type: &Token) -> bool {
        self.peek(offset)
            .map(|t| std::mem::discriminant(t) == std::mem::discriminant(token_type))
            .unwrap_or(false)
    }

    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<()> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(&token_type.to_string()))
        }
    }

    /// Contextual word check: an identifier with exactly this text
    pub(super) fn check_word(&self, word: &str) -> bool {
        self.peek_word(0, word)
    }

    pub(super) fn peek_word(&self, offset: usize, word: &str) -> bool {
        matches!(self.peek(offset), Some(Token::Identifier(s)) if s == word)
    }

    pub(super) fn match_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect_word(&mut self, word: &str) -> ParseResult<()> {
        if self.match_word(word) {
            Ok(())
        } else {
            Err(self.expected(&format!("`{}`", word)))
        }
    }

    pub(super) fn expect_identifier(&mut self) -> ParseResult<Name> {
        match self.tokens.get(self.current) {
            Some(TokenWithPosition {
                token: Token::Identifier(text),
                span,
                ..
            }) => {
                let name = Name::new(text.clone(), span.clone().into());
                self.advance();
                Ok(name)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    pub(super) fn check_identifier(&self) -> bool {
        matches!(self.current_token(), Some(Token::Identifier(_)))
    }

    /// Consume a charstring and return it as written
    pub(super) fn expect_charstring(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Some(Token::Charstring(raw)) => {
                let raw = raw.clone();
                self.advance();
                Ok(raw)
            }
            _ => Err(self.expected("charstring")),
        }
    }

    /// `>` `>` with nothing in between, read as one shift operator
    pub(super) fn adjacent_pair(&self, first: &Token, second: &Token) -> bool {
        match (self.tokens.get(self.current), self.tokens.get(self.current + 1)) {
            (Some(a), Some(b)) => {
                std::mem::discriminant(&a.token) == std::mem::discriminant(first)
                    && std::mem::discriminant(&b.token) == std::mem::discriminant(second)
                    && a.span.end == b.span.start
            }
            _ => false,
        }
    }

    // ==================== speculation ====================

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current,
            errors: self.errors.len(),
        }
    }

    pub(super) fn restore(&mut self, snapshot: Snapshot) {
        self.current = snapshot.current;
        self.errors.truncate(snapshot.errors);
    }

    /// Run `f` tentatively. On failure, or when `f` recorded diagnostics
    /// through recovery, the cursor and diagnostics are rolled back.
    pub(super) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> Option<T> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) if self.errors.len() == snapshot.errors => Some(value),
            Ok(_) => {
                trace!("speculative parse recovered from errors, rolling back to token {}", snapshot.current);
                self.restore(snapshot);
                None
            }
            Err(e) => {
                trace!("speculative parse failed ({}), rolling back to token {}", e, snapshot.current);
                self.restore(snapshot);
                None
            }
        }
    }

    // ==================== diagnostics ====================

    pub(super) fn error(&self, message: String) -> ParseError {
        ParserError::SyntaxError {
            message,
            span: self.current_span().into(),
        }
    }

    /// `UnexpectedToken`, or `UnexpectedEof` at the end of input
    pub(super) fn expected(&self, what: &str) -> ParseError {
        match self.tokens.get(self.current) {
            Some(found) => ParserError::UnexpectedToken {
                expected: what.to_string(),
                found: found.token.to_string(),
                span: found.span.clone().into(),
            },
            None => ParserError::UnexpectedEof {
                expected: what.to_string(),
                span: Span::new(self.end, self.end),
            },
        }
    }

    /// Error node covering tokens `start..current`
    pub(super) fn error_node(&self, start: usize, message: &str) -> ErrorNode {
        let skipped = &self.tokens[start.min(self.tokens.len())..self.current];
        let span = match (skipped.first(), skipped.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => {
                let at = self.current_span().start;
                Span::new(at, at)
            }
        };
        ErrorNode {
            message: message.to_string(),
            text: skipped
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            span,
        }
    }

    /// Skip to the next `;` (consumed), `}` (kept) or a token accepted by
    /// `is_sync`, always moving past at least one token from `start`.
    /// Braces opened while skipping are skipped up to their matching `}`.
    pub(super) fn synchronize(&mut self, start: usize, is_sync: fn(&Token) -> bool) {
        let mut depth = 0usize;
        if self.current == start {
            if self.check(&Token::LeftBrace) {
                depth += 1;
            }
            self.advance();
        }
        while let Some(token) = self.current_token() {
            match token {
                Token::LeftBrace => {
                    depth += 1;
                    self.advance();
                }
                Token::RightBrace if depth == 0 => break,
                Token::RightBrace => {
                    depth -= 1;
                    self.advance();
                }
                Token::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                t if depth == 0 && is_sync(t) => break,
                _ => self.advance(),
            }
        }
        trace!("recovered at token {}", self.current);
    }

    /// Record `error` and turn the tokens since `start` into an error node
    pub(super) fn recover(
        &mut self,
        error: ParseError,
        start: usize,
        is_sync: fn(&Token) -> bool,
    ) -> ErrorNode {
        debug!("syntax error: {}", error);
        let message = error.to_string();
        self.errors.push(error);
        self.synchronize(start, is_sync);
        self.error_node(start, &message)
    }

    // ==================== classification ====================

    pub(super) fn starts_definition(&self) -> bool {
        match self.current_token() {
            Some(t) if starts_definition_keyword(t) => true,
            Some(Token::Identifier(w)) if w == "mode" => {
                matches!(self.peek(1), Some(Token::Identifier(_)))
            }
            _ => false,
        }
    }

    /// Tokens after which a declaration or jump statement may end
    pub(super) fn at_statement_boundary(&self, offset: usize) -> bool {
        match self.peek(offset) {
            None => true,
            Some(t) => {
                matches!(t, Token::Semicolon | Token::RightBrace | Token::With)
                    || starts_statement(t)
                    || starts_definition_keyword(t)
            }
        }
    }
}

pub(super) fn starts_definition_keyword(token: &Token) -> bool {
    matches!(
        token,
        Token::Module
            | Token::Group
            | Token::Function
            | Token::External
            | Token::Altstep
            | Token::Testcase
            | Token::Configuration
            | Token::Control
            | Token::Type
            | Token::Const
            | Token::Var
            | Token::Timer
            | Token::Port
            | Token::Template
            | Token::Modulepar
            | Token::Signature
            | Token::Import
            | Token::Friend
            | Token::Public
            | Token::Private
            | Token::Constructor
    )
}

pub(super) fn starts_statement(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::LeftBrace
            | Token::Var
            | Token::Const
            | Token::Timer
            | Token::Port
            | Token::Template
            | Token::Label
            | Token::Goto
            | Token::Break
            | Token::Continue
            | Token::Return
            | Token::If
            | Token::Select
            | Token::For
            | Token::While
            | Token::Do
            | Token::Alt
            | Token::Interleave
            | Token::This
            | Token::SelfValue
            | Token::Unknown
            | Token::Any
            | Token::All
            | Token::Testcase
    )
}

/// Keywords a statement list resynchronizes on
pub(super) fn statement_sync(token: &Token) -> bool {
    starts_statement(token) && !matches!(token, Token::Identifier(_) | Token::LeftBrace)
}

/// Keywords a definition list resynchronizes on
pub(super) fn definition_sync(token: &Token) -> bool {
    starts_definition_keyword(token)
}
