//! Shared helpers for the parser tests

use ttcn3_syntax::ast::*;
use ttcn3_syntax::driver::{parse_source, ParseOutput};
use ttcn3_syntax::printer::render_expression;

/// Parse and return the output, diagnostics included
pub fn parse(source: &str) -> ParseOutput {
    parse_source(source)
}

/// Parse a source unit that must be free of errors
pub fn assert_parse_success(source: &str) -> SourceFile {
    let output = parse_source(source);
    assert!(
        output.is_ok(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        output.diagnostics.errors()
    );
    output.source_file
}

/// Parse a bare expression
pub fn expression(source: &str) -> Expression {
    match assert_parse_success(source).root {
        SourceRoot::Expression(expr) => expr,
        other => panic!("expected an expression root, got {:?}", other),
    }
}

/// Statements of `function f()` wrapped in a module
pub fn body(statements: &str) -> Vec<Statement> {
    let source = format!("module M {{ function f() {{ {} }} }}", statements);
    let file = assert_parse_success(&source);
    match &file.definitions()[0] {
        Definition::Module(m) => match &m.definitions[0] {
            Definition::Function(f) => f
                .body
                .as_ref()
                .map(|b| b.statements.clone())
                .unwrap_or_default(),
            other => panic!("expected a function, got {:?}", other),
        },
        other => panic!("expected a module, got {:?}", other),
    }
}

/// Definitions inside `module M { ... }`
pub fn module_definitions(definitions: &str) -> Vec<Definition> {
    let source = format!("module M {{ {} }}", definitions);
    match assert_parse_success(&source).definitions() {
        [Definition::Module(m)] => m.definitions.clone(),
        other => panic!("expected one module, got {:?}", other),
    }
}

/// Fully parenthesized operator structure of an expression
pub fn shape(expr: &Expression) -> String {
    match expr {
        Expression::Binary(b) => format!("({} {} {})", shape(&b.left), b.op.symbol(), shape(&b.right)),
        Expression::Unary(u) => format!("({} {})", u.op.symbol(), shape(&u.operand)),
        other => render_expression(other),
    }
}

mod definition_test;
mod expression_test;
mod nesting_test;
mod recovery_test;
mod statement_test;
