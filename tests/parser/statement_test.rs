//! Statement parsing tests

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_break_before_call_has_no_label() {
    let statements = body("break\nf();");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Break(j) => assert_eq!(j.label, None),
        other => panic!("expected break, got {:?}", other),
    }
    assert!(matches!(
        statements[1],
        Statement::Reference(Reference::Call { .. })
    ));
}

#[test]
fn test_continue_with_label() {
    let statements = body("continue outer;");
    match &statements[0] {
        Statement::Continue(j) => {
            assert_eq!(j.label.as_ref().map(|n| n.text.as_str()), Some("outer"))
        }
        other => panic!("expected continue, got {:?}", other),
    }
}

#[test]
fn test_return_forms() {
    let statements = body("return x + 1; return");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Return(r) => assert!(r.value.is_some()),
        other => panic!("expected return, got {:?}", other),
    }
    match &statements[1] {
        Statement::Return(r) => assert!(r.value.is_none()),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test_case("var integer x := 1;", Some("integer"), &["x"] ; "typed")]
#[test_case("var x := 1;", None, &["x"] ; "untyped")]
#[test_case("var T a, b;", Some("T"), &["a", "b"] ; "several declarators")]
#[test_case("var x;", None, &["x"] ; "bare name")]
#[test_case("var integer x\nf();", Some("integer"), &["x"] ; "next statement follows")]
fn test_declaration_heads(source: &str, ty: Option<&str>, names: &[&str]) {
    let statements = body(source);
    match &statements[0] {
        Statement::Var(decl) => {
            assert_eq!(
                decl.ty.as_ref().and_then(|t| t.as_name()).map(|n| n.text.as_str()),
                ty
            );
            let declared: Vec<&str> = decl
                .declarators
                .iter()
                .map(|d| d.name.name.text.as_str())
                .collect();
            assert_eq!(declared, names);
        }
        other => panic!("expected var, got {:?}", other),
    }
}

#[test]
fn test_const_with_array_and_template_restriction() {
    let statements = body("const integer c[2] := { 1, 2 }; var template (present) T t;");
    match &statements[0] {
        Statement::Const(decl) => assert_eq!(decl.declarators[0].array_def.len(), 1),
        other => panic!("expected const, got {:?}", other),
    }
    match &statements[1] {
        Statement::Var(decl) => assert_eq!(
            decl.template_restriction,
            Some(NestedTemplate::Template(Some(TemplateRestriction::Present)))
        ),
        other => panic!("expected var, got {:?}", other),
    }
}

#[test]
fn test_assignment_and_redirection() {
    let statements = body("x := 1; p.receive(t) -> value v sender s; p.getcall -> @index value i;");
    assert!(matches!(statements[0], Statement::Assignment(_)));
    match &statements[1] {
        Statement::Redirection(r) => {
            assert!(r.value.is_some());
            assert!(r.sender.is_some());
            assert!(r.index_value.is_none());
        }
        other => panic!("expected redirection, got {:?}", other),
    }
    match &statements[2] {
        Statement::Redirection(r) => assert!(r.index_value.is_some()),
        other => panic!("expected redirection, got {:?}", other),
    }
}

#[test]
fn test_if_with_init_and_else_if() {
    let statements = body("if (var integer i := 0; i < 1) { } else if (b) { } else { }");
    match &statements[0] {
        Statement::If(s) => {
            assert!(s.init.is_some());
            match &s.else_branch {
                Some(ElseBranch::If(nested)) => {
                    assert!(matches!(nested.else_branch, Some(ElseBranch::Block(_))))
                }
                other => panic!("expected else if, got {:?}", other),
            }
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_select_clauses() {
    let statements = body("select union (u) case (a) { } case (b) { f() } case else { }");
    match &statements[0] {
        Statement::Select(s) => {
            assert_eq!(s.kind, SelectKind::Union);
            assert_eq!(s.clauses.len(), 3);
            assert!(matches!(s.clauses[2], SelectClause::Else { .. }));
        }
        other => panic!("expected select, got {:?}", other),
    }
}

#[test]
fn test_case_else_must_be_last() {
    let output = parse("module M { function f() { select (x) case else { } case (a) { } } }");
    assert!(!output.is_ok());
}

#[test]
fn test_loops() {
    let statements = body(
        "for (var integer i := 0; i < 3; i := i + 1) { } \
         for (var x in list) { } \
         for (;;) { } \
         while (c) { } \
         do { } while (c)",
    );
    assert_eq!(statements.len(), 5);
    match &statements[0] {
        Statement::For(s) => {
            assert!(s.init.is_some());
            assert!(s.condition.is_some());
            assert!(s.post.is_some());
        }
        other => panic!("expected for, got {:?}", other),
    }
    match &statements[1] {
        Statement::ForRange(s) => {
            assert_eq!(s.binding, Some(RangeBinding::Var));
            assert_eq!(s.name.text, "x");
        }
        other => panic!("expected range for, got {:?}", other),
    }
    match &statements[2] {
        Statement::For(s) => {
            assert!(s.init.is_none() && s.condition.is_none() && s.post.is_none())
        }
        other => panic!("expected for, got {:?}", other),
    }
    assert!(matches!(statements[3], Statement::While(_)));
    assert!(matches!(statements[4], Statement::DoWhile(_)));
}

#[test]
fn test_alt_with_guards() {
    let statements = body(
        "alt @nodefault { var integer n; [x > 1] t.timeout; [] p.receive -> value v { break } [else] { } }",
    );
    match &statements[0] {
        Statement::Alt(s) => {
            assert!(s.nodefault);
            assert_eq!(s.body.items.len(), 4);
            assert!(matches!(s.body.items[0], AltItem::Var(_)));
            match &s.body.items[1] {
                AltItem::Guarded(g) => {
                    assert!(g.condition.is_some());
                    assert!(g.body.is_none());
                }
                other => panic!("expected guard, got {:?}", other),
            }
            match &s.body.items[2] {
                AltItem::Guarded(g) => {
                    assert!(g.condition.is_none());
                    assert!(matches!(g.stmt, Communication::Redirection(_)));
                    assert!(g.body.is_some());
                }
                other => panic!("expected guard, got {:?}", other),
            }
            assert!(matches!(s.body.items[3], AltItem::Else(_)));
        }
        other => panic!("expected alt, got {:?}", other),
    }
}

#[test]
fn test_block_with_catch_and_finally() {
    let statements = body("{ f() } catch { g() } finally { h() }");
    match &statements[0] {
        Statement::Block(b) => {
            assert_eq!(b.catches.len(), 1);
            assert!(b.finally.is_some());
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_local_timer_port_and_label() {
    let statements = body("timer t := 1.0; port P p; label L; goto L;");
    assert!(matches!(statements[0], Statement::Timer(_)));
    assert!(matches!(statements[1], Statement::Port(_)));
    assert!(matches!(statements[2], Statement::Label(_)));
    assert!(matches!(statements[3], Statement::Goto(_)));
}

#[test]
fn test_return_value_stops_before_assignment() {
    let statements = body("return\nx := 1;");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Return(r) => assert!(r.value.is_none()),
        other => panic!("expected return, got {:?}", other),
    }
    assert!(matches!(statements[1], Statement::Assignment(_)));
}

#[test]
fn test_break_label_stops_before_assignment() {
    let statements = body("break\nx := 1;");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Break(j) => assert_eq!(j.label, None),
        other => panic!("expected break, got {:?}", other),
    }
    assert!(matches!(statements[1], Statement::Assignment(_)));
}

#[test]
fn test_continue_label_stops_before_selector_call() {
    let statements = body("continue\na.b();");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Continue(j) => assert_eq!(j.label, None),
        other => panic!("expected continue, got {:?}", other),
    }
    match &statements[1] {
        Statement::Reference(Reference::Call { function, .. }) => {
            assert!(matches!(**function, Reference::Selector { .. }))
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_broken_initializer_keeps_the_typed_reading() {
    let output = parse("module M { function f() { var integer x := 1 + ; g(); } }");
    assert_eq!(output.diagnostics.error_count(), 1);
    let statements = match output.source_file.definitions() {
        [Definition::Module(m)] => match &m.definitions[0] {
            Definition::Function(f) => f.body.as_ref().map(|b| b.statements.clone()).unwrap_or_default(),
            other => panic!("expected a function, got {:?}", other),
        },
        other => panic!("expected one module, got {:?}", other),
    };
    assert!(!statements.iter().any(|s| matches!(s, Statement::Var(_))));
    match &statements[0] {
        Statement::Error(node) => assert!(node.text.starts_with("var integer x")),
        other => panic!("expected an error node, got {:?}", other),
    }
    assert!(matches!(statements.last(), Some(Statement::Reference(Reference::Call { .. }))));
}

#[test]
fn test_untyped_declaration_before_call() {
    let statements = body("var x\nf();");
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        Statement::Var(decl) => {
            assert!(decl.ty.is_none());
            assert_eq!(decl.declarators[0].name.name.text, "x");
        }
        other => panic!("expected var, got {:?}", other),
    }
}
