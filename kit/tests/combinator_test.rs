//! End-to-end behaviour of the combinators against the shared test grammar.
mod common;

use common::{Calc, Code, Kind, LexError, grammar, lex};
use test_case::test_case;
use tinypeg::{ErrorKind, Failure, Mismatch, ParseConfig, Span};

fn dump(input: &str) -> String {
    grammar().parse(lex(input)).unwrap().to_string()
}

fn fail(input: &str) -> Failure<'_, Calc> {
    grammar().parse(lex(input)).unwrap_err()
}

#[test]
fn test_chain_builds_sum() {
    insta::assert_snapshot!(dump("1 + 2;"), @r"
    Program
      Sum
        Num 1
        Op +
        Num 2
    ");
}

#[test]
fn test_call_with_arguments() {
    insta::assert_snapshot!(dump("f(1, x);"), @r"
    Program
      Call
        Name f
        Args
          Num 1
          Name x
    ");
}

#[test]
fn test_single_child_sequence_takes_its_kind() {
    assert_eq!(dump("(1);"), "Program\n  Paren 1");
}

#[test]
fn test_empty_program() {
    assert_eq!(dump(""), "Program");
    assert_eq!(dump("  \n "), "Program");
}

#[test]
fn test_parse_from_inner_rule() {
    let grammar = grammar();
    let expr = grammar.rule("expr").unwrap();
    let tree = grammar
        .parse_with(expr, ParseConfig::default(), lex("a - 2"))
        .unwrap();
    assert_eq!(tree.to_string(), "Sum\n  Name a\n  Op -\n  Num 2");
}

#[test_case("1 + ;", Code::ExpectTerm, ";" ; "missing operand")]
#[test_case("1 + 2", Code::ExpectSemi, "" ; "missing semicolon at eof")]
#[test_case("1; 2 3;", Code::ExpectSemi, "3" ; "second statement")]
#[test_case("f(1;", Code::ExpectSemi, "(" ; "recoverable close lets name win")]
#[test_case("f(1, );", Code::ExpectSemi, "(" ; "trailing separator")]
fn test_recoverable_failures(input: &str, code: Code, found: &str) {
    let failure = fail(input);
    assert_eq!(failure.code(), Some(code));
    assert_eq!(failure.token.text, found);
    assert!(!failure.fatal);
}

#[test]
fn test_fatal_close_is_not_backtracked() {
    let failure = fail("(1 + 2;");
    assert!(failure.fatal);
    assert_eq!(failure.code(), Some(Code::ExpectClose));
    assert_eq!(failure.token.text, ";");
    assert_eq!(failure.token.column, 7);
}

#[test]
fn test_lexical_error_is_fatal_at_offending_text() {
    let failure = fail("1 +\n  #;");
    assert!(failure.fatal);
    assert_eq!(failure.kind, ErrorKind::Lexical(LexError::Unexpected));
    assert_eq!((failure.token.line, failure.token.column), (2, 3));
    assert_eq!(failure.to_string(), "unexpected character at 2:3");
}

#[test]
fn test_generic_mismatch_without_force_error() {
    let grammar = grammar();
    let num = grammar.rule("num").unwrap();
    let failure = grammar
        .parse_with(num, ParseConfig::default(), lex("x"))
        .unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Generic(Mismatch::UnexpectedToken));
    assert_eq!(failure.expected, Some("number"));

    let failure = grammar
        .parse_with(num, ParseConfig::default(), lex(""))
        .unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Generic(Mismatch::UnexpectedEof));
}

#[test]
fn test_token_spans_are_monotonic() {
    for input in ["1 + 2;", "f(1, g(x, 2) - 3); (a);", "a;b;c - d + e;"] {
        let tree = grammar().parse(lex(input)).unwrap();
        let spans: Vec<_> = tree.tokens().map(|token| token.span).collect();
        assert!(!spans.is_empty());
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{input}: {pair:?}");
        }
    }
}

#[test]
fn test_root_span_covers_statement() {
    let tree = grammar().parse(lex("f(1, 22);")).unwrap();
    let call = tree.root().child(0).unwrap();
    assert_eq!(call.kind(), Some(Kind::Call));
    assert_eq!(call.span(), Some(Span::new(0, 7)));
    assert_eq!(call.child_count(), 2);
}

fn nested(depth: usize) -> String {
    format!("{}1{};", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_recursion_limit_is_fatal() {
    let grammar = grammar();
    let input = nested(30);
    assert!(grammar.parse(lex(&input)).is_ok());

    let config = ParseConfig::new().with_max_recursion_depth(64);
    let failure = grammar
        .parse_with(grammar.start(), config, lex(&input))
        .unwrap_err();
    assert!(failure.fatal);
    assert!(matches!(
        failure.kind,
        ErrorKind::RecursionLimit { depth: 65, limit: 64 }
    ));
}
