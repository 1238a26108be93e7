#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tinypeg::ParseConfig;

/// Source text plus a recursion limit small enough to be hit.
#[derive(Debug, Arbitrary)]
struct Input<'a> {
    source: &'a str,
    depth: u8,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(grammar) = tiny_lang::grammar() else {
        return;
    };
    let config = ParseConfig::new().with_max_recursion_depth(usize::from(input.depth) + 1);
    let lexer = tiny_lang::TinyLexer::new(input.source);

    match grammar.parse_with(grammar.start(), config, lexer) {
        Ok(tree) => {
            let mut last = 0;
            for token in tree.tokens() {
                assert!(token.span.start >= last, "leaves out of source order");
                last = token.span.end;
            }
        }
        Err(failure) => {
            assert!(failure.token.span.end <= input.source.len());
        }
    }
});
