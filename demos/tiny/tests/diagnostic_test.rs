use miette::Diagnostic;
use tiny_lang::{SyntaxDiagnostic, TinyLexer, TokenClass, parse};

fn diagnose(source: &str) -> SyntaxDiagnostic {
    let error = parse(source).unwrap_err();
    SyntaxDiagnostic::new("input.tiny", source, error.failure().unwrap())
}

#[test]
fn test_missing_semicolon() {
    let diagnostic = diagnose("int x");
    assert_eq!(diagnostic.message(), "expected ';', found end of input");
    assert_eq!(diagnostic.brief(), "1:6: error: expected ';', found end of input");
    assert_eq!(diagnostic.help().map(|h| h.to_string()), Some("expected ;".to_string()));
}

#[test]
fn test_label_points_at_offending_token() {
    let diagnostic = diagnose("int f() BEGIN return 1 END");
    assert_eq!(diagnostic.message(), "expected ';', found 'END'");

    let labels: Vec<_> = diagnostic.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 23);
    assert_eq!(labels[0].len(), 3);
    assert_eq!(labels[0].label(), Some("unexpected here"));
}

#[test]
fn test_lexical_error_has_no_help() {
    let diagnostic = diagnose("int x; \"abc");
    assert_eq!(diagnostic.message(), "unterminated string literal");
    assert!(diagnostic.help().is_none());
    assert_eq!(diagnostic.brief(), "1:8: error: unterminated string literal");
}

#[test]
fn test_diagnostic_code() {
    let diagnostic = diagnose("x;");
    assert_eq!(diagnostic.code().map(|c| c.to_string()), Some("tiny::syntax".to_string()));
    assert_eq!(diagnostic.message(), "expected a type, found 'x'");
}

#[test]
fn test_lexical_from_token_stream() {
    let source = "a /* b";
    let bad = TinyLexer::new(source)
        .find(|lexeme| lexeme.class == TokenClass::Error)
        .unwrap();
    let diagnostic = SyntaxDiagnostic::lexical("input.tiny", source, &bad.token).unwrap();
    assert_eq!(diagnostic.brief(), "1:3: error: unterminated block comment");

    let good = TinyLexer::new(source).next().unwrap();
    assert!(SyntaxDiagnostic::lexical("input.tiny", source, &good.token).is_none());
}
