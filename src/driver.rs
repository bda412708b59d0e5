//! Parsing entry points and per-file diagnostic state
//!
//! [`parse_source`] runs the lexer and the parser over one source unit and
//! returns the tree together with every diagnostic found on the way.
//! [`CompilationState`] binds a source to a `codespan-reporting` file
//! database so the CLI can render those diagnostics.

use std::fs;
use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::debug;

use crate::ast::SourceFile;
use crate::error::{ErrorCollector, TtcnError, TtcnResult};
use crate::lexer::{lexical_errors, tokenize, TokenWithPosition};
use crate::parser::Parser;

/// Result of parsing one source unit
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub source_file: SourceFile,
    pub diagnostics: ErrorCollector,
    /// The full token stream, trivia included
    pub tokens: Vec<TokenWithPosition>,
}

impl ParseOutput {
    /// Malformed literals alone do not make a parse fail.
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Parse a source unit. Diagnostics are bound to file id 0.
pub fn parse_source(source: &str) -> ParseOutput {
    parse_source_with_id(source, 0)
}

pub fn parse_source_with_id(source: &str, file_id: usize) -> ParseOutput {
    let tokens = tokenize(source);
    debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());

    let mut diagnostics = ErrorCollector::new();
    for error in lexical_errors(&tokens) {
        diagnostics.add(error.into(), file_id);
    }

    let mut parser = Parser::new(tokens.clone());
    let source_file = parser.parse_source_file();
    for error in parser.take_errors() {
        diagnostics.add(error.into(), file_id);
    }
    debug!(
        "parsed {} definition(s), {} error(s), {} warning(s)",
        source_file.definitions().len(),
        diagnostics.error_count(),
        diagnostics.warning_count()
    );

    ParseOutput {
        source_file,
        diagnostics,
        tokens,
    }
}

/// Read and parse a file
pub fn parse_file<P: AsRef<Path>>(path: P) -> TtcnResult<ParseOutput> {
    let source = fs::read_to_string(path.as_ref()).map_err(|e| {
        TtcnError::Io(format!("failed to read {}: {}", path.as_ref().display(), e))
    })?;
    Ok(parse_source(&source))
}

/// One source file registered for diagnostic rendering
pub struct CompilationState {
    pub source_name: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    pub error_collector: ErrorCollector,
}

impl CompilationState {
    pub fn new<P: AsRef<Path>>(path: P) -> TtcnResult<Self> {
        let source_name = path.as_ref().display().to_string();
        let source = fs::read_to_string(path.as_ref())
            .map_err(|e| TtcnError::Io(format!("failed to read {}: {}", source_name, e)))?;
        Ok(Self::new_from_string(&source_name, source))
    }

    pub fn new_from_string(name: &str, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(name.to_string(), source.clone());
        Self {
            source_name: name.to_string(),
            source,
            files,
            file_id,
            error_collector: ErrorCollector::new(),
        }
    }

    /// Parse the source and keep its diagnostics
    pub fn parse(&mut self) -> ParseOutput {
        let output = parse_source_with_id(&self.source, self.file_id);
        self.error_collector.extend(output.diagnostics.clone());
        output
    }

    pub fn report_diagnostics(&self) -> TtcnResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        for diagnostic in self.error_collector.all_sorted() {
            codespan_reporting::term::emit(
                &mut writer.lock(),
                &config,
                &self.files,
                &diagnostic.to_diagnostic(),
            )
            .map_err(|e| TtcnError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }
        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        self.error_collector.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.error_collector.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.error_collector.warning_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRoot;

    #[test]
    fn bare_expression_has_no_diagnostics() {
        let output = parse_source("1+2");
        assert!(output.is_ok());
        assert!(matches!(output.source_file.root, SourceRoot::Expression(_)));
    }

    #[test]
    fn malformed_literal_is_only_a_warning() {
        let output = parse_source("module M { const bitstring b := '123'x; }");
        assert!(output.is_ok());
        assert_eq!(output.diagnostics.warning_count(), 1);
    }

    #[test]
    fn lexical_and_syntax_errors_are_collected() {
        let output = parse_source("module M { const integer c := 1 § ; }");
        assert!(!output.is_ok());
        assert!(output.diagnostics.error_count() >= 1);
    }

    #[test]
    fn state_collects_parse_diagnostics() {
        let mut state = CompilationState::new_from_string("t.ttcn", "module M { x }".to_string());
        let output = state.parse();
        assert_eq!(output.source_file.definitions().len(), 1);
        assert!(state.has_errors());
        assert_eq!(state.error_count(), output.diagnostics.error_count());
    }
}
