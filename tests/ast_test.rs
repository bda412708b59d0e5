//! Syntax tree tests
//!
//! Serialization, spans and the small helpers on tree nodes.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ttcn3_syntax::ast::*;
    use ttcn3_syntax::parse_source;

    fn build(source: &str) -> SourceFile {
        let output = parse_source(source);
        assert!(output.is_ok(), "{:?}", output.diagnostics);
        output.source_file
    }

    #[test]
    fn test_span_helpers() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert_eq!(span.merge(Span::new(5, 12)), Span::new(5, 20));
        assert!(Span::dummy().is_empty());
        assert_eq!(Span::from(3..7), Span::new(3, 7));
    }

    #[test]
    fn test_json_round_trip() {
        let file = build(
            "module M {\n\
             type record R { integer a optional }\n\
             template R t := { a := omit }\n\
             function f() return integer { var integer x := 1; return x }\n\
             } with { encode \"RAW\" }",
        );
        let json = serde_json::to_string(&file).expect("serialize");
        let back: SourceFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, file);
    }

    #[test]
    fn test_definition_spans_cover_source() {
        let source = "module M { const integer c := 1; }";
        let file = build(source);
        let module = &file.definitions()[0];
        assert_eq!(module.span(), Span::new(0, source.len()));
        match module {
            Definition::Module(m) => {
                let c = &m.definitions[0];
                assert_eq!(&source[c.span().start..c.span().end], "const integer c := 1");
            }
            other => panic!("expected a module, got {:?}", other),
        }
    }

    #[test]
    fn test_definition_names_and_kinds() {
        let file = build("module M { type set of integer S; function f() { } import from N all }");
        let m = match &file.definitions()[0] {
            Definition::Module(m) => m,
            other => panic!("expected a module, got {:?}", other),
        };
        let summary: Vec<(&str, Option<&str>)> = m
            .definitions
            .iter()
            .map(|d| (d.kind_name(), d.name().map(|n| n.text.as_str())))
            .collect();
        assert_eq!(
            summary,
            vec![("set of", Some("S")), ("function", Some("f")), ("import", None)]
        );
    }

    #[test]
    fn test_expression_root_accessors() {
        let file = build("a + 1");
        assert!(file.definitions().is_empty());
        let expr = file.expression().expect("expression root");
        assert_eq!(expr.span(), Span::new(0, 5));
        assert!(expr.as_reference().is_none());
    }

    #[test]
    fn test_literal_keeps_spelling() {
        let file = build("'0A'H");
        match file.expression() {
            Some(Expression::Literal(l)) => {
                assert_eq!(l.kind, LiteralKind::Hexstring);
                assert_eq!(l.text, "'0A'H");
            }
            other => panic!("expected a literal, got {:?}", other),
        }
    }
}
