#![no_main]

use libfuzzer_sys::fuzz_target;
use tiny_lang::{TinyLexer, TokenClass};

fuzz_target!(|data: &str| {
    let mut last = 0;
    for lexeme in TinyLexer::new(data) {
        let span = lexeme.token.span;
        assert!(span.start >= last, "tokens out of order");
        assert!(span.end <= data.len());
        assert_eq!(&data[span.start..span.end], lexeme.token.text);
        if lexeme.class == TokenClass::Error {
            assert!(lexeme.token.lex_error().is_some());
        }
        last = span.end;
    }
});
