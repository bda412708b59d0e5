//! Definition parsing tests

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("type integer Small (0 .. 9);", "subtype" ; "subtype")]
#[test_case("type record R { integer a, boolean b optional }", "record" ; "record")]
#[test_case("type union U { integer i, charstring s }", "union" ; "union")]
#[test_case("type record length(3) of integer Triple;", "record of" ; "record of")]
#[test_case("type set of R Bag;", "set of" ; "set of")]
#[test_case("type map from charstring to integer Table;", "map" ; "map")]
#[test_case("type enumerated Color { red, green(2) }", "enumerated" ; "enumerated")]
#[test_case("type component C { var integer n; }", "component" ; "component")]
#[test_case("type port P message { inout integer }", "port type" ; "port type")]
#[test_case("type function F(integer x) return integer;", "function type" ; "function type")]
#[test_case("type altstep A() runs on C;", "altstep type" ; "altstep type")]
#[test_case("type testcase T() runs on C system S;", "testcase type" ; "testcase type")]
#[test_case("type class K { }", "class" ; "class")]
#[test_case("signature S(in integer x) return boolean exception (E);", "signature" ; "signature")]
#[test_case("external function ext(integer x) return integer;", "external function" ; "external function")]
#[test_case("modulepar integer MP := 1;", "modulepar" ; "modulepar")]
#[test_case("timer t;", "timer" ; "timer")]
#[test_case("control { f() }", "control" ; "control")]
#[test_case("mode Idle() runs on C { }", "mode" ; "mode")]
fn test_definition_kinds(source: &str, kind: &str) {
    let definitions = module_definitions(source);
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].kind_name(), kind);
}

#[test]
fn test_function_header() {
    let definitions = module_definitions(
        "public function @deterministic f<in type T>(in template (present) T p, out integer r[2] ...) \
         runs on C mtc M system S return template integer { }",
    );
    match &definitions[0] {
        Definition::Function(f) => {
            assert_eq!(f.visibility, Some(Visibility::Public));
            assert_eq!(f.modifiers.len(), 1);
            assert_eq!(f.name.type_parameters.as_ref().map(Vec::len), Some(1));
            assert_eq!(f.parameters.len(), 2);
            assert_eq!(f.parameters[0].direction, Some(Direction::In));
            assert!(f.parameters[1].variadic);
            assert_eq!(f.parameters[1].array_def.len(), 1);
            assert!(f.context.runs_on.is_some());
            assert!(f.context.mtc.is_some());
            assert!(f.context.system.is_some());
            assert!(f.return_type.is_some());
            assert!(f.body.is_some());
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_forward_declaration_has_no_body() {
    let definitions = module_definitions("function g(integer x) return integer;");
    match &definitions[0] {
        Definition::Function(f) => assert!(f.body.is_none()),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_template_definition() {
    let definitions =
        module_definitions("template (value) R t_base(integer x) modifies t_parent := { a := x };");
    match &definitions[0] {
        Definition::Template(t) => {
            assert_eq!(t.restriction, Some(TemplateRestriction::Value));
            assert_eq!(t.name.name.text, "t_base");
            assert_eq!(t.parameters.as_ref().map(Vec::len), Some(1));
            assert!(t.modifies.is_some());
            assert!(matches!(t.value, Expression::Composite(_)));
        }
        other => panic!("expected a template, got {:?}", other),
    }
}

#[test]
fn test_imports() {
    let definitions = module_definitions(
        "import from A all; \
         import from B -> Local all except { type X, Y; const all }; \
         import from C { group G except { function f }; type all except Z }",
    );
    assert_eq!(definitions.len(), 3);
    match &definitions[1] {
        Definition::Import(i) => {
            assert_eq!(i.local_name.as_ref().map(|n| n.text.as_str()), Some("Local"));
            match &i.body {
                ImportBody::All { except: Some(specs) } => {
                    assert_eq!(specs.len(), 2);
                    assert_eq!(specs[1].kind, ImportKind::Const);
                    assert!(specs[1].refs.is_none());
                }
                other => panic!("expected all except, got {:?}", other),
            }
        }
        other => panic!("expected an import, got {:?}", other),
    }
    match &definitions[2] {
        Definition::Import(i) => match &i.body {
            ImportBody::Specs(specs) => assert_eq!(specs.len(), 2),
            other => panic!("expected import specs, got {:?}", other),
        },
        other => panic!("expected an import, got {:?}", other),
    }
}

#[test]
fn test_groups_nest() {
    let definitions = module_definitions("group G { group H { const integer c := 1; } }");
    match &definitions[0] {
        Definition::Group(g) => match &g.definitions[0] {
            Definition::Group(h) => assert_eq!(h.definitions.len(), 1),
            other => panic!("expected a group, got {:?}", other),
        },
        other => panic!("expected a group, got {:?}", other),
    }
}

#[test]
fn test_attributes_on_definitions() {
    let definitions = module_definitions(
        "type record R { integer a } with { encode \"RAW\"; variant (a) \"FIELDLENGTH(8)\" }",
    );
    match &definitions[0] {
        Definition::Structured(r) => {
            let attributes = r.attributes.as_ref().map(|w| w.attributes.len());
            assert_eq!(attributes, Some(2));
        }
        other => panic!("expected a record, got {:?}", other),
    }
}

#[test]
fn test_testcase_runs_clauses() {
    let definitions = module_definitions(
        "testcase tc1() runs on C system S { } testcase tc2() execute on Cfg { }",
    );
    match &definitions[0] {
        Definition::Testcase(t) => assert!(matches!(
            t.runs,
            Some(TestcaseRuns::RunsOn { system: Some(_), .. })
        )),
        other => panic!("expected a testcase, got {:?}", other),
    }
    match &definitions[1] {
        Definition::Testcase(t) => assert!(matches!(t.runs, Some(TestcaseRuns::ExecuteOn(_)))),
        other => panic!("expected a testcase, got {:?}", other),
    }
}

#[test]
fn test_module_cannot_have_visibility() {
    let output = parse("public module M { }");
    assert!(!output.is_ok());
}

#[test]
fn test_several_top_level_modules() {
    let file = assert_parse_success("module A { } module B { }");
    assert_eq!(file.definitions().len(), 2);
}
