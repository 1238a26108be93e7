use test_case::test_case;
use tiny_lang::{LexError, TinyLexer, TokenClass};
use tinypeg::Span;

fn classes(input: &str) -> Vec<(TokenClass, &str)> {
    TinyLexer::new(input)
        .map(|lexeme| (lexeme.class, lexeme.token.text))
        .collect()
}

#[test_case("foo_1", TokenClass::Identifier ; "identifier")]
#[test_case("_x", TokenClass::Identifier ; "leading underscore")]
#[test_case("42", TokenClass::Number ; "decimal")]
#[test_case("3.25e-2", TokenClass::Number ; "exponent")]
#[test_case("0x1F", TokenClass::Number ; "hex")]
#[test_case("\"a \\\"b\\\" \\x41\"", TokenClass::String ; "string with escapes")]
#[test_case("'\\n'", TokenClass::Char ; "character")]
#[test_case(":=", TokenClass::Operator ; "assign")]
#[test_case(">>=", TokenClass::Operator ; "longest operator")]
#[test_case("(", TokenClass::Symbol ; "paren")]
#[test_case("@", TokenClass::Symbol ; "at sign")]
fn test_single_lexeme(input: &str, class: TokenClass) {
    assert_eq!(
        classes(input),
        [(class, input), (TokenClass::End, "")],
        "lexing {input:?}"
    );
}

#[test]
fn test_statement() {
    assert_eq!(
        classes("x := y==1;"),
        [
            (TokenClass::Identifier, "x"),
            (TokenClass::Operator, ":="),
            (TokenClass::Identifier, "y"),
            (TokenClass::Operator, "=="),
            (TokenClass::Number, "1"),
            (TokenClass::Symbol, ";"),
            (TokenClass::End, ""),
        ]
    );
}

#[test]
fn test_whitespace_and_comments_are_dropped() {
    let texts: Vec<_> = classes("a // one\n/* two\n three */ b")
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    assert_eq!(texts, ["a", "b", ""]);
}

#[test]
fn test_positions() {
    let tokens: Vec<_> = TinyLexer::new("int x;\n  real\ty;")
        .map(|lexeme| (lexeme.token.line, lexeme.token.column, lexeme.token.span))
        .collect();
    assert_eq!(
        tokens,
        [
            (1, 1, Span::new(0, 3)),
            (1, 5, Span::new(4, 5)),
            (1, 6, Span::new(5, 6)),
            (2, 3, Span::new(9, 13)),
            (2, 8, Span::new(14, 15)),
            (2, 9, Span::new(15, 16)),
            (2, 10, Span::new(16, 16)),
        ]
    );
}

#[test_case("\"abc", LexError::UnterminatedString ; "open string")]
#[test_case("\"ab\ncd\"", LexError::UnterminatedString ; "newline in string")]
#[test_case("'a", LexError::UnterminatedChar ; "open character")]
#[test_case("/* never closed", LexError::UnterminatedComment ; "open comment")]
#[test_case("1e+", LexError::InvalidNumber ; "empty exponent")]
#[test_case("\"\\x4\"", LexError::BadHexEscape ; "short hex escape")]
fn test_lexical_errors(input: &str, error: LexError) {
    let first = TinyLexer::new(input).next().unwrap();
    assert_eq!(first.class, TokenClass::Error);
    assert_eq!(first.token.lex_error(), Some(error));
    assert_eq!(first.token.span.start, 0);
    assert_eq!((first.token.line, first.token.column), (1, 1));
}

#[test]
fn test_iterator_stops_after_end() {
    let mut lexer = TinyLexer::new("x");
    assert_eq!(lexer.by_ref().count(), 2);
    assert!(lexer.next().is_none());
}
