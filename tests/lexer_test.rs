//! Lexer tests
//!
//! Token classification, lossless round trips, positions and lexical
//! diagnostics.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use ttcn3_syntax::lexer::{lexical_errors, tokenize, Lexer, Token};

    /// Non-trivia token kinds of a source string
    fn significant(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .map(|t| t.token)
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test_case("module M { }" ; "module")]
    #[test_case("// line\nvar integer x := 1; /* block\n comment */" ; "comments")]
    #[test_case("x := '0101'B & 'FF'H & 'F'O & \"a\"\"b\"" ; "literals")]
    #[test_case("\u{FEFF}a\u{00A0}b\u{3000}c" ; "unicode whitespace")]
    #[test_case("a § b" ; "unrecognized character")]
    #[test_case("'123'x + 1" ; "malformed literal")]
    fn test_token_texts_reproduce_input(source: &str) {
        let joined: String = tokenize(source).into_iter().map(|t| t.text).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            significant("module forward modules in inout"),
            vec![
                Token::Module,
                Token::Identifier("forward".to_string()),
                Token::Identifier("modules".to_string()),
                Token::In,
                Token::Inout,
            ]
        );
    }

    #[test]
    fn test_contextual_words_are_identifiers() {
        assert_eq!(
            significant("map system mtc"),
            vec![
                Token::Identifier("map".to_string()),
                Token::Identifier("system".to_string()),
                Token::Identifier("mtc".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_literal_kinds() {
        assert_eq!(
            significant("'01'B '0F'H 'FF'O 'ZZ'O"),
            vec![
                Token::Bitstring("'01'B".to_string()),
                Token::Hexstring("'0F'H".to_string()),
                Token::Octetstring("'FF'O".to_string()),
                Token::MalformedString("'ZZ'O".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_literal_is_one_token() {
        let tokens = significant("'123'x");
        assert_eq!(tokens, vec![Token::MalformedString("'123'x".to_string())]);

        let errors = lexical_errors(&tokenize("'123'x"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            significant("... .. . := -> => <@ @> ++ --"),
            vec![
                Token::Ellipsis,
                Token::DotDot,
                Token::Dot,
                Token::Assign,
                Token::Arrow,
                Token::FatArrow,
                Token::RotateLeft,
                Token::RotateRight,
                Token::PlusPlus,
                Token::MinusMinus,
            ]
        );
    }

    #[test]
    fn test_shift_is_two_tokens() {
        assert_eq!(
            significant("a << b"),
            vec![
                Token::Identifier("a".to_string()),
                Token::Less,
                Token::Less,
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_modifier_keeps_at_sign() {
        assert_eq!(
            significant("@nodefault"),
            vec![Token::Modifier("@nodefault".to_string())]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            significant("1 1.5 2e10 3.0E-2"),
            vec![
                Token::Number("1".to_string()),
                Token::Number("1.5".to_string()),
                Token::Number("2e10".to_string()),
                Token::Number("3.0E-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens: Vec<_> = Lexer::new("a\n  b")
            .filter(|t| !t.token.is_trivia())
            .collect();
        assert_eq!(tokens[0].position.line, 1);
        assert_eq!(tokens[0].position.column, 1);
        assert_eq!(tokens[1].position.line, 2);
        assert_eq!(tokens[1].position.column, 3);
        assert_eq!(tokens[1].span, 4..5);
    }

    #[test]
    fn test_unrecognized_character_continues() {
        let tokens = tokenize("a § b");
        assert!(tokens.iter().any(|t| t.token == Token::Error && t.text == "§"));
        assert_eq!(
            significant("a § b").last(),
            Some(&Token::Identifier("b".to_string()))
        );
        assert_eq!(lexical_errors(&tokens).len(), 1);
    }
}
