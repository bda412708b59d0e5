//! Error types and diagnostics
//!
//! Lexer and parser failures are plain `thiserror` enums carrying a [`Span`].
//! [`DiagnosticError`] attaches a file id and renders through
//! `codespan-reporting`; [`ErrorCollector`] keeps errors and warnings apart.

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use thiserror::Error;

/// Umbrella error type of the crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtcnError {
    #[error("lexical error: {0}")]
    Lexer(#[from] LexerError),

    #[error("syntax error: {0}")]
    Parser(#[from] ParserError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("unrecognized character `{text}`")]
    UnrecognizedCharacter { text: String, span: Span },

    #[error("malformed literal {text}: {reason}")]
    MalformedLiteral {
        text: String,
        reason: String,
        span: Span,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("{message}")]
    SyntaxError { message: String, span: Span },
}

impl LexerError {
    pub fn span(&self) -> Span {
        match self {
            LexerError::UnrecognizedCharacter { span, .. }
            | LexerError::MalformedLiteral { span, .. } => *span,
        }
    }
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::SyntaxError { span, .. } => *span,
        }
    }
}

impl TtcnError {
    pub fn span(&self) -> Option<Span> {
        match self {
            TtcnError::Lexer(e) => Some(e.span()),
            TtcnError::Parser(e) => Some(e.span()),
            TtcnError::Io(_) | TtcnError::Other(_) => None,
        }
    }

    /// Malformed literals do not make a parse fail.
    pub fn is_warning(&self) -> bool {
        matches!(self, TtcnError::Lexer(LexerError::MalformedLiteral { .. }))
    }
}

impl From<std::io::Error> for TtcnError {
    fn from(e: std::io::Error) -> Self {
        TtcnError::Io(e.to_string())
    }
}

/// An error bound to a source file
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticError {
    pub error: TtcnError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: TtcnError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    pub fn severity(&self) -> Severity {
        if self.error.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Convert into a codespan-reporting diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let label_message = match &self.error {
            TtcnError::Lexer(LexerError::UnrecognizedCharacter { .. }) => "not valid here",
            TtcnError::Lexer(LexerError::MalformedLiteral { .. }) => "malformed literal",
            TtcnError::Parser(ParserError::UnexpectedEof { .. }) => "input ends here",
            TtcnError::Parser(_) => "unexpected syntax",
            TtcnError::Io(_) | TtcnError::Other(_) => "",
        };
        let labels = match self.error.span() {
            Some(span) => vec![Label::primary(self.file_id, span.start..span.end)
                .with_message(label_message)],
            None => vec![],
        };

        Diagnostic::new(self.severity())
            .with_message(self.error.to_string())
            .with_labels(labels)
    }
}

/// Accumulates diagnostics of one or more files
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
    warnings: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Malformed literals land among the warnings.
    pub fn add(&mut self, error: TtcnError, file_id: usize) {
        if error.is_warning() {
            self.add_warning(error, file_id);
        } else {
            self.add_error(error, file_id);
        }
    }

    pub fn add_error(&mut self, error: TtcnError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    pub fn add_warning(&mut self, error: TtcnError, file_id: usize) {
        self.warnings.push(DiagnosticError::new(error, file_id));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[DiagnosticError] {
        &self.warnings
    }

    /// Errors and warnings ordered by source position
    pub fn all_sorted(&self) -> Vec<&DiagnosticError> {
        let mut all: Vec<_> = self.errors.iter().chain(self.warnings.iter()).collect();
        all.sort_by_key(|d| (d.file_id, d.error.span().map(|s| s.start).unwrap_or(0)));
        all
    }

    pub fn extend(&mut self, other: ErrorCollector) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

pub type TtcnResult<T> = Result<T, TtcnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_literals_are_warnings() {
        let mut collector = ErrorCollector::new();
        collector.add(
            LexerError::MalformedLiteral {
                text: "'1'x".into(),
                reason: "unknown string suffix `x`".into(),
                span: Span::new(0, 4),
            }
            .into(),
            0,
        );
        collector.add(
            ParserError::SyntaxError {
                message: "expected expression".into(),
                span: Span::new(5, 6),
            }
            .into(),
            0,
        );
        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.all_sorted()[0].severity(), Severity::Warning);
    }

    #[test]
    fn diagnostic_carries_primary_label() {
        let error = DiagnosticError::new(
            ParserError::UnexpectedEof {
                expected: "`}`".into(),
                span: Span::new(10, 10),
            }
            .into(),
            3,
        );
        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].file_id, 3);
        assert_eq!(diagnostic.labels[0].range, 10..10);
        assert!(diagnostic.message.contains("unexpected end of input"));
    }
}
