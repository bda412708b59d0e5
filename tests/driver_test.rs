//! Driver tests
//!
//! File loading, diagnostic collection and canonical rendering.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;
    use ttcn3_syntax::driver::{parse_file, parse_source, CompilationState};
    use ttcn3_syntax::printer::render;
    use ttcn3_syntax::{SourceFile, TtcnError};

    const SAMPLE: &str = r#"
module Sample {
    import from Types all except { type Hidden };

    type component MyComp {
        port MyPort pt;
        timer t_guard := 5.0;
    }

    type enumerated State { idle, busy(1) }

    // matching template
    template (present) Msg t_msg(integer id) := {
        id := id,
        payload := omit
    }

    altstep as_default() runs on MyComp {
        [] t_guard.timeout { setverdict(fail) }
        [] pt.receive { repeat }
    }

    function f_loop(in integer n) runs on MyComp return integer {
        var integer sum := 0;
        for (var integer i := 0; i < n; i := i + 1) {
            sum := sum + i * 2;
        }
        while (sum > 100) { sum := sum - 1 }
        select (sum) case (0) { return 0 } case else { }
        return sum
    }

    testcase tc_basic() runs on MyComp system MyComp {
        pt.send(t_msg(1));
        alt {
            [] pt.receive(t_msg(2)) -> value v sender s { setverdict(pass) }
            [else] { break }
        }
    }

    control {
        execute(tc_basic());
    }
} with { encode "RAW" }
"#;

    /// Tree structure with spans and comments left out
    fn structure(file: &SourceFile) -> serde_json::Value {
        fn strip(value: &mut serde_json::Value) {
            match value {
                serde_json::Value::Object(map) => {
                    map.remove("span");
                    map.values_mut().for_each(strip);
                }
                serde_json::Value::Array(items) => items.iter_mut().for_each(strip),
                _ => {}
            }
        }
        let mut value = serde_json::to_value(file).expect("tree serializes");
        if let serde_json::Value::Object(map) = &mut value {
            map.remove("comments");
        }
        strip(&mut value);
        value
    }

    fn temp_source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_parse_file_reads_source() {
        let file = temp_source("module M { const integer c := 1; }");
        let output = parse_file(file.path()).expect("parse file");
        assert!(output.is_ok());
        assert_eq!(output.source_file.definitions().len(), 1);
    }

    #[test]
    fn test_parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = parse_file(dir.path().join("missing.ttcn"));
        assert!(matches!(result, Err(TtcnError::Io(_))));
    }

    #[test]
    fn test_compilation_state_from_file() {
        let file = temp_source("module M { function f() { x := } }");
        let mut state = CompilationState::new(file.path()).expect("load");
        let output = state.parse();
        assert!(state.has_errors());
        assert_eq!(state.error_count(), output.diagnostics.error_count());
        assert_eq!(state.warning_count(), 0);
    }

    #[test]
    fn test_diagnostics_are_sorted_by_position() {
        let output = parse_source("module M { const := ; var := ; }");
        let starts: Vec<usize> = output
            .diagnostics
            .all_sorted()
            .iter()
            .filter_map(|d| d.error.span())
            .map(|s| s.start)
            .collect();
        assert_eq!(starts.len(), 2);
        assert!(starts[0] < starts[1]);
    }

    #[test]
    fn test_comments_are_returned() {
        let output = parse_source(SAMPLE);
        assert!(output.is_ok(), "{:?}", output.diagnostics);
        assert_eq!(output.source_file.comments.len(), 1);
        assert_eq!(output.source_file.comments[0].text, "// matching template");
    }

    #[test]
    fn test_token_stream_is_lossless() {
        let output = parse_source(SAMPLE);
        let joined: String = output.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, SAMPLE);
    }

    #[test_case(SAMPLE ; "sample module")]
    #[test_case("a + -b * (c - 1)" ; "expression")]
    #[test_case("module M { type record of integer L (1 .. 3) length(2); }" ; "list type")]
    #[test_case("module M { type port P map to Q message realtime { in integer from octetstring with dec(); address A; map param (integer p) } }" ; "port type")]
    #[test_case("module M { type external class @abstract K extends B runs on C { var integer n; } finally { } }" ; "class")]
    #[test_case("module M { friend module A, B; private friend module C; public group G { } }" ; "friends and groups")]
    fn test_rendering_is_a_fixed_point(source: &str) {
        let first = parse_source(source);
        assert!(first.is_ok(), "{:?}", first.diagnostics);
        let once = render(&first.source_file);

        let second = parse_source(&once);
        assert!(second.is_ok(), "rendering does not parse:\n{}\n{:?}", once, second.diagnostics);
        assert_eq!(render(&second.source_file), once);
        assert_eq!(structure(&second.source_file), structure(&first.source_file));
    }
}
