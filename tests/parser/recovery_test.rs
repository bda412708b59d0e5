//! Error recovery tests

use super::*;
use pretty_assertions::assert_eq;

fn module_of(output: &ttcn3_syntax::ParseOutput) -> &ModuleDef {
    match output.source_file.definitions() {
        [Definition::Module(m)] => m,
        other => panic!("expected one module, got {:?}", other),
    }
}

#[test]
fn test_bad_definition_becomes_error_node() {
    let output = parse("module M { const := ; function f() {} }");
    assert_eq!(output.diagnostics.error_count(), 1);

    let module = module_of(&output);
    assert_eq!(module.definitions.len(), 2);
    assert!(matches!(module.definitions[0], Definition::Error(_)));
    assert!(matches!(module.definitions[1], Definition::Function(_)));
}

#[test]
fn test_bad_statement_becomes_error_node() {
    let output = parse("module M { function f() { x := ; g(); } }");
    assert!(!output.is_ok());

    let module = module_of(&output);
    match &module.definitions[0] {
        Definition::Function(f) => {
            let statements = &f.body.as_ref().map(|b| b.statements.clone()).unwrap_or_default();
            assert!(matches!(statements[0], Statement::Error(_)));
            assert!(statements
                .iter()
                .any(|s| matches!(s, Statement::Reference(Reference::Call { .. }))));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_error_node_keeps_skipped_text() {
    let output = parse("module M { const := ; }");
    let module = module_of(&output);
    match &module.definitions[0] {
        Definition::Error(node) => {
            assert!(node.text.starts_with("const"));
            assert!(!node.message.is_empty());
        }
        other => panic!("expected an error node, got {:?}", other),
    }
}

#[test]
fn test_unparsable_unit_is_one_error_node() {
    let output = parse("x y");
    assert!(!output.is_ok());
    assert!(matches!(
        output.source_file.definitions(),
        [Definition::Error(_)]
    ));
}

#[test]
fn test_empty_source_has_no_definitions() {
    let output = parse("  // nothing here\n");
    assert!(output.is_ok());
    assert!(output.source_file.definitions().is_empty());
    assert_eq!(output.source_file.comments.len(), 1);
}

#[test]
fn test_missing_closing_brace_reports_eof() {
    let output = parse("module M { function f() {");
    assert!(!output.is_ok());
}

#[test]
fn test_recovery_in_alt_block() {
    let output = parse("module M { function f() { alt { [] p.receive; 42; [else] { } } } }");
    assert!(!output.is_ok());
    let module = module_of(&output);
    match &module.definitions[0] {
        Definition::Function(f) => match f.body.as_ref().map(|b| &b.statements[0]) {
            Some(Statement::Alt(alt)) => {
                assert!(alt.body.items.iter().any(|i| matches!(i, AltItem::Error(_))));
                assert!(matches!(alt.body.items.last(), Some(AltItem::Else(_))));
            }
            other => panic!("expected alt, got {:?}", other),
        },
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_recovery_skips_nested_braces() {
    let output = parse("module M { function f() { if (x { f(); } g(); } function h() { } }");
    assert_eq!(output.diagnostics.error_count(), 1);

    let module = module_of(&output);
    assert_eq!(module.definitions.len(), 2);
    match &module.definitions[0] {
        Definition::Function(f) => {
            let statements = f.body.as_ref().map(|b| b.statements.len());
            assert_eq!(statements, Some(1));
        }
        other => panic!("expected a function, got {:?}", other),
    }
    assert!(matches!(module.definitions[1], Definition::Function(_)));
}
