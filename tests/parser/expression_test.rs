//! Expression parsing tests

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("1 + 2 * 3", "(1 + (2 * 3))" ; "multiplication binds tighter")]
#[test_case("a - b - c", "((a - b) - c)" ; "left associative")]
#[test_case("a and b or c", "((a and b) or c)" ; "and before or")]
#[test_case("a or b xor c and d", "(a or (b xor (c and d)))" ; "logical levels")]
#[test_case("- - a", "(- (- a))" ; "nested prefix")]
#[test_case("-a * b", "((- a) * b)" ; "prefix binds tighter than multiplication")]
#[test_case("not a == b", "(not (a == b))" ; "not below equality")]
#[test_case("not a and b", "((not a) and b)" ; "not above and")]
#[test_case("a << 2 < b", "((a << 2) < b)" ; "shift above relational")]
#[test_case("a >> 1", "(a >> 1)" ; "shift right from two tokens")]
#[test_case("a & b & c", "((a & b) & c)" ; "concatenation")]
#[test_case("x mod 2 == 0", "((x mod 2) == 0)" ; "mod is multiplicative")]
#[test_case("not4b a and4b b", "((not4b a) and4b b)" ; "bitwise not above bitwise and")]
fn test_operator_structure(source: &str, expected: &str) {
    assert_eq!(shape(&expression(source)), expected);
}

#[test]
fn test_compact_sum_is_a_bare_expression() {
    let file = assert_parse_success("1+2");
    match file.root {
        SourceRoot::Expression(Expression::Binary(b)) => assert_eq!(b.op, BinaryOp::Add),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

#[test]
fn test_lone_minus_is_not_used() {
    match expression("f(-, 1)") {
        Expression::Reference(Reference::Call { arguments, .. }) => {
            assert_eq!(arguments.len(), 2);
            match &arguments[0] {
                Expression::Literal(l) => assert_eq!(l.kind, LiteralKind::NotUsed),
                other => panic!("expected a literal, got {:?}", other),
            }
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_postfix_chain_nests_left() {
    match expression("a.b[0](x)") {
        Expression::Reference(Reference::Call { function, arguments, variadic, .. }) => {
            assert_eq!(arguments.len(), 1);
            assert!(!variadic);
            assert!(matches!(*function, Reference::Index { .. }));
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_keyword_selector_field() {
    match expression("p.catch") {
        Expression::Reference(Reference::Selector { field, .. }) => {
            assert_eq!(field.as_name().map(|n| n.text.as_str()), Some("catch"));
        }
        other => panic!("expected a selector, got {:?}", other),
    }
}

#[test]
fn test_composite_and_template_values() {
    match expression("{ a := 1, b := { } }") {
        Expression::Composite(list) => {
            assert_eq!(list.items.len(), 2);
            assert!(matches!(list.items[0], Expression::FieldAssignment(_)));
        }
        other => panic!("expected a composite, got {:?}", other),
    }
    match expression("(1 .. 5, 7)") {
        Expression::TemplateValues(list) => {
            assert!(matches!(list.items[0], Expression::Range(_)));
            assert_eq!(list.items.len(), 2);
        }
        other => panic!("expected template values, got {:?}", other),
    }
}

#[test]
fn test_from_call() {
    match expression("any from ports") {
        Expression::Reference(Reference::FromCall { quantifier, argument, .. }) => {
            assert_eq!(quantifier, Quantifier::Any);
            assert_eq!(argument.text, "ports");
        }
        other => panic!("expected a from call, got {:?}", other),
    }
}

#[test_case("any port", ReferenceKeyword::AnyPort ; "any port")]
#[test_case("all timer", ReferenceKeyword::AllTimer ; "all timer")]
#[test_case("self", ReferenceKeyword::SelfRef ; "self")]
#[test_case("???", ReferenceKeyword::Unknown ; "unknown")]
fn test_reference_keywords(source: &str, expected: ReferenceKeyword) {
    match expression(source) {
        Expression::Reference(Reference::Keyword { keyword, .. }) => assert_eq!(keyword, expected),
        other => panic!("expected a keyword reference, got {:?}", other),
    }
}

#[test]
fn test_trailing_input_is_an_error() {
    let output = parse("1 + 2 )");
    assert!(!output.is_ok());
    assert_eq!(output.source_file.definitions().len(), 1);
}

#[test]
fn test_function_literal_is_a_bare_expression() {
    match expression("function (integer x) return integer { return x }") {
        Expression::FunctionLiteral(f) => {
            assert_eq!(f.parameters.len(), 1);
            assert!(f.return_type.is_some());
        }
        other => panic!("expected a function literal, got {:?}", other),
    }
}

#[test]
fn test_testcase_reference_is_a_bare_expression() {
    match expression("testcase.stop") {
        Expression::Reference(Reference::Selector { operand, .. }) => assert!(matches!(
            *operand,
            Reference::Keyword { keyword: ReferenceKeyword::Testcase, .. }
        )),
        other => panic!("expected a selector, got {:?}", other),
    }
}

#[test]
fn test_broken_definition_is_not_an_expression() {
    let output = parse("function f( { }");
    assert!(!output.is_ok());
    assert!(matches!(output.source_file.root, SourceRoot::Definitions(_)));
}
