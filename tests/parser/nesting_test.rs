//! Deeply nested input

use super::*;
use pretty_assertions::assert_eq;
use ttcn3_syntax::printer::render;

fn nested_blocks(depth: usize) -> String {
    format!(
        "module M {{ function f() {{ {}{} }} }}",
        "{".repeat(depth),
        "}".repeat(depth)
    )
}

/// Nesting depth of a chain of single-statement blocks
fn block_depth(file: &SourceFile) -> usize {
    let mut statements = match file.definitions() {
        [Definition::Module(m)] => match m.definitions.as_slice() {
            [Definition::Function(f)] => match &f.body {
                Some(body) => body.statements.as_slice(),
                None => panic!("expected a function body"),
            },
            _ => panic!("expected one function"),
        },
        _ => panic!("expected one module"),
    };
    let mut depth = 0;
    while let [Statement::Block(block)] = statements {
        depth += 1;
        statements = block.statements.as_slice();
    }
    depth
}

#[test]
fn test_deeply_nested_blocks() {
    let source = nested_blocks(1500);
    let output = parse(&source);
    assert!(output.is_ok());
    assert_eq!(block_depth(&output.source_file), 1500);

    let rendered = render(&output.source_file);
    let reparsed = parse(&rendered);
    assert!(reparsed.is_ok());
    assert_eq!(block_depth(&reparsed.source_file), 1500);
}

#[test]
fn test_deeply_nested_parentheses() {
    let source = format!("{}1{}", "(".repeat(1500), ")".repeat(1500));
    let output = parse(&source);
    assert!(output.is_ok());

    let mut expr = match &output.source_file.root {
        SourceRoot::Expression(expr) => expr,
        _ => panic!("expected an expression root"),
    };
    let mut depth = 0;
    while let Expression::TemplateValues(list) = expr {
        assert_eq!(list.items.len(), 1);
        depth += 1;
        expr = &list.items[0];
    }
    assert_eq!(depth, 1500);
}

#[test]
fn test_deep_nesting_with_an_error_still_returns() {
    let source = format!("module M {{ function f() {{ {}x := ;{} }} }}", "{".repeat(1200), "}".repeat(1200));
    let output = parse(&source);
    assert_eq!(output.diagnostics.error_count(), 1);
}
